// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Connector linking project subscriptions to GitHub-style repositories.
//!
//! The library validates that a configured repository reference exists and
//! is reachable, probes liveness of the remote service, and aggregates
//! independent remote calls (repository detail, contributors, search) into
//! a single deterministic status snapshot that tolerates partial failure.
//! Subscription persistence, credential storage, and user-facing surfaces
//! stay outside this crate; all failures crossing the boundary are
//! normalized into the [`Error`] taxonomy.

mod client;
mod config;
mod contributors;
mod error;
mod reference;
mod repository;
mod search;
mod status;

pub use client::GithubApi;
pub use config::{
    CODE_REPOSITORY, DEFAULT_API_URL, MemoryParameterStore, PARAM_API_URL, PARAM_AUTH_TOKEN,
    PARAM_REPOSITORY, ParameterStore, SERVICE_KEY, SubscriptionParameters,
};
pub use contributors::{Contributor, list_contributors};
pub use error::Error;
pub use reference::RepoReference;
pub use repository::{RepoDetail, ResolveError, check_exists, resolve_detail};
pub use search::{SearchCandidate, find_repos_by_name};
pub use status::{
    StatusSnapshot, check_status, check_subscription_status, last_version, link, version,
};
