// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Status orchestration.
//!
//! Coordinates the resolver and the contributor aggregator behind the three
//! public connector contracts: liveness check, link-time validation, and
//! the full status snapshot. Each operation is stateless across
//! invocations and resolves its subscription parameters once at entry.
//!
//! A status check walks a fixed path: the detail fetch decides `up`, and
//! only a successful detail fetch triggers the contributor fetch, whose
//! failure degrades to an empty list without downing the snapshot. No
//! retries happen within a single check.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    client::GithubApi,
    config::{CODE_REPOSITORY, PARAM_REPOSITORY, ParameterStore, SubscriptionParameters},
    contributors::{Contributor, list_contributors},
    error::Error,
    repository::{RepoDetail, check_exists, resolve_detail},
};

/// Aggregated point-in-time status of a linked repository.
///
/// Produced fresh on every check and never persisted by this crate. When
/// the repository detail cannot be fetched the snapshot is down: all counts
/// are zero and the contributor list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// Whether the linked repository resolved successfully.
    pub up:           bool,
    /// Number of accounts watching the repository.
    pub watchers:     u64,
    /// Number of stargazers.
    pub stars:        u64,
    /// Number of open issues.
    pub issues:       u64,
    /// Contributor list in remote order; empty when unavailable.
    #[serde(rename = "contribs")]
    pub contributors: Vec<Contributor>,
}

impl StatusSnapshot {
    /// Builds the snapshot for an unreachable or absent repository.
    fn down() -> Self {
        Self {
            up:           false,
            watchers:     0,
            stars:        0,
            issues:       0,
            contributors: Vec::new()
        }
    }

    /// Builds the snapshot for a resolved repository.
    fn available(detail: RepoDetail, contributors: Vec<Contributor>) -> Self {
        Self {
            up: true,
            watchers: detail.watchers,
            stars: detail.stars,
            issues: detail.open_issues,
            contributors
        }
    }
}

/// Reports the connector version.
///
/// The connector does not track a remote service version; callers of the
/// subscription contract still expect the operation to exist.
pub fn version() -> Option<String> {
    None
}

/// Reports the latest available connector version. Always absent, matching
/// [`version`].
pub fn last_version() -> Option<String> {
    None
}

/// Checks that the remote service and credentials are reachable.
///
/// Performs a minimal profile lookup for the configured repository owner.
/// Ordinary unreachability (any non-success status, network fault) yields
/// `false` without erroring.
///
/// # Errors
///
/// Returns [`Error::Network`] only when the transport itself cannot be
/// constructed from the parameters.
pub async fn check_status(parameters: &SubscriptionParameters) -> Result<bool, Error> {
    let api = GithubApi::from_parameters(parameters)?;
    let path = format!("/users/{}", parameters.repository.owner);
    Ok(api.probe(&path).await)
}

/// Validates a subscription's repository binding at link time.
///
/// Loads the subscription's parameters from the store and confirms that the
/// configured repository exists on the remote. No remote mutation occurs.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the repository parameter key with
/// code `github-repository` when the repository cannot be resolved, and
/// propagates parameter-resolution failures from the store.
pub async fn link<S>(store: &S, subscription: i64) -> Result<(), Error>
where
    S: ParameterStore
{
    let bag = store.parameters(subscription)?;
    let parameters = SubscriptionParameters::from_map(&bag)?;
    let api = GithubApi::from_parameters(&parameters)?;

    if !check_exists(&api, &parameters.repository).await {
        return Err(Error::validation(PARAM_REPOSITORY, CODE_REPOSITORY));
    }

    info!(subscription, repository = %parameters.repository, "repository link validated");
    Ok(())
}

/// Produces the full status snapshot for a subscription.
///
/// The detail fetch alone decides `up`. When it succeeds, the contributor
/// fetch enriches the snapshot; its failure degrades to an empty list while
/// the counts stay populated.
///
/// # Errors
///
/// Returns [`Error::Network`] only when the transport itself cannot be
/// constructed from the parameters. Remote failures are reported through
/// the snapshot, never as errors.
pub async fn check_subscription_status(
    parameters: &SubscriptionParameters,
) -> Result<StatusSnapshot, Error> {
    let api = GithubApi::from_parameters(parameters)?;
    let reference = &parameters.repository;

    let detail = match resolve_detail(&api, reference).await {
        Ok(detail) => detail,
        Err(error) => {
            warn!(repository = %reference, %error, "repository detail unavailable");
            return Ok(StatusSnapshot::down());
        }
    };

    let contributors = match list_contributors(&api, reference).await {
        Ok(contributors) => contributors,
        Err(error) => {
            warn!(repository = %reference, %error, "contributor fetch degraded to empty list");
            Vec::new()
        }
    };

    Ok(StatusSnapshot::available(detail, contributors))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{Value, json};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::{check_status, check_subscription_status, last_version, link, version};
    use crate::{
        config::{
            MemoryParameterStore, PARAM_API_URL, PARAM_REPOSITORY, SubscriptionParameters,
        },
        error::Error,
    };

    const SUBSCRIPTION: i64 = 1;

    fn parameters_for(server: &MockServer) -> SubscriptionParameters {
        SubscriptionParameters::from_map(&bag_for(server, "junit/gfi-gstack"))
            .expect("valid parameters")
    }

    fn bag_for(server: &MockServer, repository: &str) -> HashMap<String, String> {
        HashMap::from([
            (PARAM_REPOSITORY.to_owned(), repository.to_owned()),
            (PARAM_API_URL.to_owned(), server.uri()),
        ])
    }

    async fn mock_detail(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/junit/gfi-gstack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "gfi-gstack",
                "full_name": "junit/gfi-gstack",
                "watchers_count": 3,
                "stargazers_count": 3,
                "open_issues_count": 2
            })))
            .mount(server)
            .await;
    }

    async fn mock_contributors(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/junit/gfi-gstack/contributors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "login": "fabdouglas",
                    "contributions": 345,
                    "avatar_url": "https://avatars1.githubusercontent.com/u/579170?v=4"
                },
                {
                    "login": "dursun-dalkilic",
                    "contributions": 44,
                    "avatar_url": "https://avatars2.githubusercontent.com/u/7567820?v=4"
                },
                {
                    "login": "kloe-fi",
                    "contributions": 1,
                    "avatar_url": "https://avatars3.githubusercontent.com/u/34934546?v=4"
                }
            ])))
            .mount(server)
            .await;
    }

    async fn mock_user(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/users/junit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "junit"})))
            .mount(server)
            .await;
    }

    #[test]
    fn connector_reports_no_version() {
        assert!(version().is_none());
        assert!(last_version().is_none());
    }

    #[tokio::test]
    async fn snapshot_is_up_with_full_data() {
        let server = MockServer::start().await;
        mock_detail(&server).await;
        mock_contributors(&server).await;

        let snapshot = check_subscription_status(&parameters_for(&server))
            .await
            .expect("parameters are well formed");

        assert!(snapshot.up);
        assert_eq!(snapshot.watchers, 3);
        assert_eq!(snapshot.stars, 3);
        assert_eq!(snapshot.issues, 2);
        assert_eq!(snapshot.contributors.len(), 3);
        assert_eq!(snapshot.contributors[0].login, "fabdouglas");
        assert_eq!(snapshot.contributors[0].contributions, 345);
        assert_eq!(
            snapshot.contributors[0].avatar_url,
            "https://avatars1.githubusercontent.com/u/579170?v=4"
        );
    }

    #[tokio::test]
    async fn contributor_failure_keeps_snapshot_up_with_empty_list() {
        let server = MockServer::start().await;
        mock_detail(&server).await;
        // No contributors stub: that endpoint answers 404.

        let snapshot = check_subscription_status(&parameters_for(&server))
            .await
            .expect("parameters are well formed");

        assert!(snapshot.up);
        assert_eq!(snapshot.watchers, 3);
        assert_eq!(snapshot.stars, 3);
        assert_eq!(snapshot.issues, 2);
        assert!(snapshot.contributors.is_empty());
    }

    #[tokio::test]
    async fn detail_failure_downs_snapshot_without_data() {
        let server = MockServer::start().await;
        mock_contributors(&server).await;
        // No detail stub: the decisive fetch answers 404.

        let snapshot = check_subscription_status(&parameters_for(&server))
            .await
            .expect("parameters are well formed");

        assert!(!snapshot.up);
        assert_eq!(snapshot.watchers, 0);
        assert_eq!(snapshot.stars, 0);
        assert_eq!(snapshot.issues, 0);
        assert!(snapshot.contributors.is_empty());
    }

    #[tokio::test]
    async fn server_error_on_detail_also_downs_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/junit/gfi-gstack"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let snapshot = check_subscription_status(&parameters_for(&server))
            .await
            .expect("parameters are well formed");
        assert!(!snapshot.up);
    }

    #[tokio::test]
    async fn repeated_checks_yield_identical_snapshots() {
        let server = MockServer::start().await;
        mock_detail(&server).await;
        mock_contributors(&server).await;

        let parameters = parameters_for(&server);
        let first = check_subscription_status(&parameters).await.expect("first check");
        let second = check_subscription_status(&parameters).await.expect("second check");

        assert_eq!(first, second);
        let first_json = serde_json::to_vec(&first).expect("snapshot serializes");
        let second_json = serde_json::to_vec(&second).expect("snapshot serializes");
        assert_eq!(first_json, second_json);
    }

    #[tokio::test]
    async fn snapshot_serializes_with_wire_keys() {
        let server = MockServer::start().await;
        mock_detail(&server).await;
        mock_contributors(&server).await;

        let snapshot = check_subscription_status(&parameters_for(&server))
            .await
            .expect("parameters are well formed");
        let value: Value = serde_json::to_value(&snapshot).expect("snapshot serializes");

        assert_eq!(value["up"], json!(true));
        assert_eq!(value["watchers"], json!(3));
        assert_eq!(value["stars"], json!(3));
        assert_eq!(value["issues"], json!(2));
        assert_eq!(value["contribs"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn liveness_probe_is_true_on_success_status() {
        let server = MockServer::start().await;
        mock_user(&server).await;

        assert!(check_status(&parameters_for(&server)).await.expect("well formed parameters"));
    }

    #[tokio::test]
    async fn liveness_probe_is_false_on_client_error() {
        // No /users stub: every path answers 404.
        let server = MockServer::start().await;
        assert!(!check_status(&parameters_for(&server)).await.expect("well formed parameters"));
    }

    #[tokio::test]
    async fn link_accepts_existing_repository() {
        let server = MockServer::start().await;
        mock_detail(&server).await;

        let mut store = MemoryParameterStore::new();
        store.insert(SUBSCRIPTION, bag_for(&server, "junit/gfi-gstack"));

        link(&store, SUBSCRIPTION).await.expect("existing repository links");
    }

    #[tokio::test]
    async fn link_rejects_absent_repository_with_parameter_and_code() {
        let server = MockServer::start().await;
        mock_user(&server).await;
        // Detail endpoint unstubbed: the reference resolves to 404.

        let mut store = MemoryParameterStore::new();
        store.insert(SUBSCRIPTION, bag_for(&server, "junit/0"));

        let error = link(&store, SUBSCRIPTION).await.unwrap_err();
        match error {
            Error::Validation {
                ref parameter,
                ref code
            } => {
                assert_eq!(parameter, "service:scm:github:repository");
                assert_eq!(code, "github-repository");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[tokio::test]
    async fn link_propagates_unknown_subscription() {
        let store = MemoryParameterStore::new();
        let error = link(&store, 99).await.unwrap_err();
        assert!(matches!(error, Error::Validation { .. }));
    }
}
