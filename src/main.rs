// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the ghlink binary.
//!
//! The CLI exposes the connector operations as subcommands: liveness
//! check, link-time validation, status snapshot, and repository search.
//! Parameters arrive as flags or environment variables and are resolved
//! into the same typed configuration the library uses.

use std::{collections::HashMap, process};

use clap::{Args, Parser, Subcommand};
use ghlink::{
    DEFAULT_API_URL, Error, GithubApi, MemoryParameterStore, PARAM_API_URL, PARAM_AUTH_TOKEN,
    PARAM_REPOSITORY, SubscriptionParameters, check_status, check_subscription_status,
    find_repos_by_name, link,
};

/// Command line interface for checking GitHub repository linkage status.
#[derive(Debug, Parser)]
#[command(name = "ghlink", version, about = "Check GitHub repository linkage status")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Supported commands exposed by the CLI.
#[derive(Debug, Subcommand)]
enum Command {
    /// Probe liveness of the remote service and credentials.
    Check(RepositoryArgs),
    /// Validate that the configured repository exists (link-time check).
    Link(RepositoryArgs),
    /// Print the full status snapshot as JSON.
    Status(RepositoryArgs),
    /// Search repositories by name fragment within an owner scope.
    Search(SearchArgs),
}

/// Arguments identifying the linked repository and the remote endpoint.
#[derive(Debug, Args)]
struct RepositoryArgs {
    /// Repository reference in owner/repo form.
    #[arg(long = "repository", value_name = "OWNER/REPO")]
    repository: String,

    /// Base URL of the remote API.
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token forwarded to the remote API.
    #[arg(long = "token", value_name = "TOKEN", env = "GHLINK_TOKEN")]
    token: Option<String>,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Owner or organization restricting the search scope.
    #[arg(long = "owner", value_name = "LOGIN")]
    owner: String,

    /// Name fragment to search for.
    #[arg(long = "query", value_name = "FRAGMENT")]
    query: String,

    /// Base URL of the remote API.
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token forwarded to the remote API.
    #[arg(long = "token", value_name = "TOKEN", env = "GHLINK_TOKEN")]
    token: Option<String>,
}

impl RepositoryArgs {
    fn into_parameter_bag(self) -> HashMap<String, String> {
        let mut bag = HashMap::from([
            (PARAM_REPOSITORY.to_owned(), self.repository),
            (PARAM_API_URL.to_owned(), self.api_url),
        ]);
        if let Some(token) = self.token {
            bag.insert(PARAM_AUTH_TOKEN.to_owned(), token);
        }
        bag
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Executes the selected subcommand.
///
/// # Errors
///
/// Propagates validation and serialization failures; liveness results are
/// reported through the exit status instead.
async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Check(args) => {
            let parameters = SubscriptionParameters::from_map(&args.into_parameter_bag())?;
            let up = check_status(&parameters).await?;
            println!("{}", if up { "up" } else { "down" });
            if !up {
                process::exit(1);
            }
        }
        Command::Link(args) => {
            let mut store = MemoryParameterStore::new();
            store.insert(0, args.into_parameter_bag());
            link(&store, 0).await?;
            println!("link validated");
        }
        Command::Status(args) => {
            let parameters = SubscriptionParameters::from_map(&args.into_parameter_bag())?;
            let snapshot = check_subscription_status(&parameters).await?;
            let rendered = serde_json::to_string_pretty(&snapshot)
                .map_err(|error| Error::decode(format!("failed to render snapshot: {error}")))?;
            println!("{rendered}");
        }
        Command::Search(args) => {
            let api = GithubApi::new(args.api_url, args.token)?;
            for candidate in find_repos_by_name(&api, &args.owner, &args.query).await {
                println!("{}", candidate.name);
            }
        }
    }

    Ok(())
}
