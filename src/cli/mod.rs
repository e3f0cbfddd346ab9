//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the tenable binary.

use clap::{Args, Parser, Subcommand};

use crate::auth::{ACCESS_KEY_ENV, SECRET_KEY_ENV};
use crate::config::BASE_URL_ENV;
use crate::error::Result;
use crate::models::{AnalysisFilter, AnalysisRequest, RepositoryQuery, LIST_VULN_TOOL};
use crate::pagination::{OffsetWindow, DEFAULT_PAGE_SIZE};
use crate::{ClientConfig, Credentials};

/// Tenable.sc API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "tenable", about = "Tenable.sc API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where and how to connect.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Base URL of the Tenable.sc instance.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub url: Option<String>,

    /// API access key.
    #[arg(long, global = true, env = ACCESS_KEY_ENV, hide_env_values = true)]
    pub access_key: Option<String>,

    /// API secret key.
    #[arg(long, global = true, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long, global = true, default_value = "false")]
    pub insecure: bool,
}

impl ConnectionArgs {
    /// Credentials as given, with missing keys left empty.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.access_key.clone().unwrap_or_default(),
            self.secret_key.clone().unwrap_or_default(),
        )
    }

    /// Client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::ConfigMissing`](crate::TenableError::ConfigMissing)
    /// if the URL or either key is missing.
    pub fn config(&self) -> Result<ClientConfig> {
        let lookup = |name: &str| match name {
            BASE_URL_ENV => self.url.clone(),
            ACCESS_KEY_ENV => self.access_key.clone(),
            SECRET_KEY_ENV => self.secret_key.clone(),
            _ => None,
        };
        Ok(ClientConfig::from_lookup(lookup)?.with_accept_invalid_certs(self.insecure))
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the user the API keys belong to.
    Whoami,

    /// List repositories.
    #[command(alias = "repos")]
    Repositories {
        /// Repository type: All, Local, Remote, Offline or another server type.
        #[arg(long = "type", default_value = "All")]
        repository_type: String,

        /// Comma-separated fields to return (e.g. `id,name`).
        #[arg(long, default_value = "")]
        fields: String,
    },

    /// Run a vulnerability analysis query.
    Analysis {
        /// Comma-separated plugin IDs to filter on.
        #[arg(long, value_delimiter = ',')]
        plugin_ids: Vec<String>,

        /// Analysis tool.
        #[arg(long, default_value = LIST_VULN_TOOL)]
        tool: String,

        /// Offset of the first record.
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Offset one past the last record.
        #[arg(long)]
        end: Option<u64>,
    },

    /// Report whether complete credentials are configured.
    AuthStatus,
}

impl Command {
    /// Repository query for [`Command::Repositories`].
    pub fn repository_query(&self) -> Option<Result<RepositoryQuery>> {
        match self {
            Command::Repositories {
                repository_type,
                fields,
            } => Some(RepositoryQuery::from_parts(repository_type, fields)),
            _ => None,
        }
    }

    /// Analysis request for [`Command::Analysis`].
    pub fn analysis_request(&self) -> Option<AnalysisRequest> {
        match self {
            Command::Analysis {
                plugin_ids,
                tool,
                start,
                end,
            } => {
                let end = end.unwrap_or_else(|| start.saturating_add(DEFAULT_PAGE_SIZE));
                let mut request =
                    AnalysisRequest::vulnerabilities(tool).with_window(OffsetWindow::new(*start, end));
                if !plugin_ids.is_empty() {
                    request = request.with_filter(AnalysisFilter::plugin_ids(plugin_ids));
                }
                Some(request)
            }
            _ => None,
        }
    }
}
