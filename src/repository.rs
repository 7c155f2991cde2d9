// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository resolution.
//!
//! Confirms that a configured repository reference actually exists on the
//! remote and extracts its canonical metadata counts. A client-error class
//! response is a confirmed absence; every other failure is a remote fault
//! that must not be mistaken for a misconfigured reference.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{client::GithubApi, error::Error, reference::RepoReference};

/// Canonical metadata snapshot for one repository.
///
/// Fetched fresh per call and never cached. Counts missing from the remote
/// body default to zero rather than failing the whole fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoDetail {
    /// Number of accounts watching the repository.
    #[serde(default, rename = "watchers_count")]
    pub watchers:    u64,
    /// Number of stargazers.
    #[serde(default, rename = "stargazers_count")]
    pub stars:       u64,
    /// Number of open issues.
    #[serde(default, rename = "open_issues_count")]
    pub open_issues: u64,
}

/// Outcome of a failed resolution, separating confirmed absence from
/// remote faults.
#[derive(Debug, masterror::Error)]
pub enum ResolveError {
    /// The remote confirmed the repository does not exist (or refused the
    /// request with a client-error status).
    #[error("repository not found on the remote")]
    NotFound,
    /// The remote could not be queried or answered abnormally.
    #[error("remote failure while resolving repository: {source}")]
    Remote {
        /// Underlying normalized failure.
        source: Error
    }
}

/// Fetches the detail record for the referenced repository.
///
/// # Errors
///
/// * [`ResolveError::NotFound`] for any client-error class response.
/// * [`ResolveError::Remote`] for network faults, server errors, and
///   undecodable detail bodies.
pub async fn resolve_detail(
    api: &GithubApi,
    reference: &RepoReference,
) -> Result<RepoDetail, ResolveError> {
    debug!(repository = %reference, "resolving repository detail");

    let path = format!("/repos/{}/{}", reference.owner, reference.name);
    match api.get::<RepoDetail>(&path, &[]).await {
        Ok(detail) => Ok(detail),
        Err(error) if error.is_client_error() => Err(ResolveError::NotFound),
        Err(error) => Err(ResolveError::Remote {
            source: error
        })
    }
}

/// Returns true iff the referenced repository resolves successfully.
pub async fn check_exists(api: &GithubApi, reference: &RepoReference) -> bool {
    resolve_detail(api, reference).await.is_ok()
}
