// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Subscription parameter resolution.
//!
//! Subscriptions carry their service-specific settings as a flat key-value
//! bag owned by an external parameter store. The types in this module
//! resolve that bag into a typed [`SubscriptionParameters`] struct once per
//! operation entry, so the core logic never performs raw string-keyed
//! lookups and missing required parameters fail fast with a validation
//! error naming the offending key.

use std::collections::HashMap;

use crate::{error::Error, reference::RepoReference};

/// Identifier of this connector, used as the parameter-key prefix.
pub const SERVICE_KEY: &str = "service:scm:github";

/// Parameter key holding the linked `owner/repo` identifier.
pub const PARAM_REPOSITORY: &str = "service:scm:github:repository";

/// Parameter key overriding the remote API base URL.
pub const PARAM_API_URL: &str = "service:scm:github:api-url";

/// Parameter key holding the optional bearer token.
pub const PARAM_AUTH_TOKEN: &str = "service:scm:github:auth-token";

/// Stable error code raised when the linked repository cannot be resolved.
pub const CODE_REPOSITORY: &str = "github-repository";

/// Base URL used when no override parameter is present.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Typed view over a subscription's parameter bag.
///
/// Resolved once at the entry of each public operation; the remote calls
/// issued afterwards only see validated, well-formed values.
#[derive(Debug, Clone)]
pub struct SubscriptionParameters {
    /// Base URL of the remote API.
    pub api_url:    String,
    /// Linked repository reference.
    pub repository: RepoReference,
    /// Optional opaque bearer token forwarded by the transport.
    pub token:      Option<String>,
}

impl SubscriptionParameters {
    /// Resolves a raw parameter bag into typed parameters.
    ///
    /// The repository parameter is required and must parse as an
    /// `owner/repo` reference. The API URL falls back to
    /// [`DEFAULT_API_URL`] when absent, and a blank token is treated as
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming [`PARAM_REPOSITORY`] when the
    /// repository parameter is absent or malformed.
    pub fn from_map(parameters: &HashMap<String, String>) -> Result<Self, Error> {
        let repository = parameters
            .get(PARAM_REPOSITORY)
            .ok_or_else(|| Error::validation(PARAM_REPOSITORY, CODE_REPOSITORY))
            .and_then(|raw| RepoReference::parse(raw))?;

        let api_url = parameters
            .get(PARAM_API_URL)
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let token = parameters
            .get(PARAM_AUTH_TOKEN)
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_owned);

        Ok(Self {
            api_url,
            repository,
            token
        })
    }
}

/// Read access to the externally-owned subscription parameter store.
///
/// Persistence and lifecycle of the bindings live outside this crate; the
/// orchestrator only needs to load the bag attached to one subscription.
pub trait ParameterStore {
    /// Returns the parameter bag attached to the given subscription.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the subscription is unknown.
    fn parameters(&self, subscription: i64) -> Result<HashMap<String, String>, Error>;
}

/// In-memory parameter store backing tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    subscriptions: HashMap<i64, HashMap<String, String>>,
}

impl MemoryParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscription with its parameter bag.
    pub fn insert(&mut self, subscription: i64, parameters: HashMap<String, String>) {
        self.subscriptions.insert(subscription, parameters);
    }
}

impl ParameterStore for MemoryParameterStore {
    fn parameters(&self, subscription: i64) -> Result<HashMap<String, String>, Error> {
        self.subscriptions
            .get(&subscription)
            .cloned()
            .ok_or_else(|| Error::validation(SERVICE_KEY, "unknown-subscription"))
    }
}
