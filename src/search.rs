// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository name search.
//!
//! Queries the remote search endpoint for repositories whose name matches a
//! fragment, scoped to a fixed owner. Only the first response page is
//! consumed. Search feeds auto-completion, so every failure degrades to an
//! empty listing rather than an error: an unreachable or misbehaving remote
//! must not break the caller's form.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::GithubApi;

/// One candidate repository returned by a name search.
///
/// Both fields carry the repository's full name as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    /// Stable identifier of the candidate.
    pub id:   String,
    /// Display name of the candidate.
    pub name: String,
}

/// First page of a repository search response.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<Value>,
}

/// Searches repositories whose name contains `criteria` under `owner_scope`.
///
/// Returns the first page of candidates in remote order. Zero hits produce
/// an empty vec, as does any remote or decode failure (logged at `warn`).
pub async fn find_repos_by_name(
    api: &GithubApi,
    owner_scope: &str,
    criteria: &str,
) -> Vec<SearchCandidate> {
    let query = format!("{criteria} in:name user:{owner_scope}");
    debug!(%query, "searching repositories by name");

    let page: SearchPage = match api.get("/search/repositories", &[("q", &query)]).await {
        Ok(page) => page,
        Err(error) => {
            warn!(%query, %error, "repository search degraded to empty listing");
            return Vec::new();
        }
    };

    let mut candidates = Vec::with_capacity(page.items.len());
    for item in &page.items {
        match item.get("full_name").and_then(Value::as_str) {
            Some(full_name) => candidates.push(SearchCandidate {
                id:   full_name.to_owned(),
                name: full_name.to_owned()
            }),
            None => {
                warn!(%query, "dropping search item without full_name");
            }
        }
    }

    debug!(%query, count = candidates.len(), "repository search completed");
    candidates
}
