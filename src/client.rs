// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Remote API client.
//!
//! Issues GET requests against a configurable base URL and normalizes every
//! outcome into the crate error taxonomy: success bodies are JSON-decoded,
//! non-success statuses map to client/server variants, and transport
//! failures (connect errors, timeouts) collapse into the network variant so
//! upstream logic treats them uniformly as "remote unreachable". No retry
//! is attempted; recoverability is the caller's decision.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{config::SubscriptionParameters, error::Error};

/// Bounded per-request timeout applied by the transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("ghlink/", env!("CARGO_PKG_VERSION"));

/// GET-only client over the remote repository API.
#[derive(Clone)]
pub struct GithubApi {
    http:     Client,
    base_url: String,
    token:    Option<String>,
}

impl std::fmt::Debug for GithubApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubApi")
            .field("base_url", &self.base_url)
            .field("token", &self.token.is_some())
            .finish()
    }
}

impl GithubApi {
    /// Creates a client bound to the given base URL and optional token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the underlying transport cannot be
    /// constructed.
    pub fn new<U>(base_url: U, token: Option<String>) -> Result<Self, Error>
    where
        U: Into<String>
    {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| Error::network(format!("failed to build transport: {error}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            base_url,
            token
        })
    }

    /// Creates a client from resolved subscription parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the underlying transport cannot be
    /// constructed.
    pub fn from_parameters(parameters: &SubscriptionParameters) -> Result<Self, Error> {
        Self::new(parameters.api_url.clone(), parameters.token.clone())
    }

    /// Issues a GET request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// * [`Error::Client`] for 4xx responses.
    /// * [`Error::Server`] for 5xx responses.
    /// * [`Error::Decode`] when a success body fails to decode.
    /// * [`Error::Network`] for connect failures and timeouts.
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned
    {
        let url = self.url_for(path);
        debug!(url = %url, "GET request starting");

        let mut request = self.http.get(&url);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "GET request rejected");
            return Err(Error::from_status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|error| Error::decode(format!("invalid body from {url}: {error}")))
    }

    /// Issues a GET request and reports only whether it succeeded.
    ///
    /// Transport failures and non-success statuses both yield `false`; this
    /// never errors, matching the liveness-probe contract.
    pub async fn probe(&self, path: &str) -> bool {
        let url = self.url_for(path);

        let mut request = self.http.get(&url);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let up = response.status().is_success();
                debug!(url = %url, status = response.status().as_u16(), up, "probe completed");
                up
            }
            Err(error) => {
                debug!(url = %url, %error, "probe failed to reach remote");
                false
            }
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
