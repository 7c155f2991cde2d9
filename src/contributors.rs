// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Contributor aggregation.
//!
//! Fetches the contributor list for a resolved repository. Contributors are
//! enrichment data: elements with unparseable required fields are dropped
//! instead of aborting the whole list, and the remote-provided order
//! (typically descending contribution count) is preserved without local
//! re-sorting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{client::GithubApi, error::Error, reference::RepoReference};

/// One repository contributor as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contributor {
    /// Account login.
    pub login:         String,
    /// Total contribution count for this repository.
    pub contributions: u64,
    /// Avatar image URL.
    pub avatar_url:    String,
}

/// Fetches the contributor list for the referenced repository.
///
/// Returns the first response page in remote order. Undecodable elements
/// are dropped with a warning; partial results are preferred over total
/// failure for this non-critical data.
///
/// # Errors
///
/// Returns the normalized [`Error`] when the request itself fails or the
/// response is not a JSON array.
pub async fn list_contributors(
    api: &GithubApi,
    reference: &RepoReference,
) -> Result<Vec<Contributor>, Error> {
    debug!(repository = %reference, "fetching contributors");

    let path = format!("/repos/{}/{}/contributors", reference.owner, reference.name);
    let raw: Vec<Value> = api.get(&path, &[]).await?;

    let mut contributors = Vec::with_capacity(raw.len());
    for element in raw {
        match serde_json::from_value::<Contributor>(element) {
            Ok(contributor) => contributors.push(contributor),
            Err(error) => {
                warn!(repository = %reference, %error, "dropping undecodable contributor entry");
            }
        }
    }

    debug!(repository = %reference, count = contributors.len(), "contributors fetched");
    Ok(contributors)
}
