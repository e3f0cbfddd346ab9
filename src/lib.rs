//! Tenable.sc API client library.
//!
//! A typed client for the Tenable.sc (SecurityCenter) REST API. Requests are
//! authenticated with an API key pair sent in the `X-Apikey` header, and every
//! response is unwrapped from the vendor's JSON envelope.
//!
//! # Quick Start
//!
//! ```no_run
//! use tenable::{AnalysisFilter, AnalysisRequest, RepositoryQuery, TenableClient};
//!
//! #[tokio::main]
//! async fn main() -> tenable::Result<()> {
//!     // Create client from environment variables
//!     let client = TenableClient::from_env()?;
//!
//!     // Who do the API keys belong to?
//!     let user = client.current_user().get().await?;
//!     println!("User: {:?}", user.username);
//!
//!     // List all repositories, returning only their IDs and names
//!     let query = RepositoryQuery::default().with_fields(["id", "name"]);
//!     let repositories = client.repositories().list(&query).await?;
//!     println!("Found {} repositories", repositories.len());
//!
//!     // Query vulnerabilities reported by a plugin
//!     let request = AnalysisRequest::vulnerabilities("listvuln")
//!         .with_filter(AnalysisFilter::plugin_ids(["19506"]));
//!     let page = client.analysis().query(&request).await?;
//!     println!("Found {:?} records", page.total_records);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`TenableClient`] builds requests, sends them through a [`Transport`]
//!   and decodes responses.
//! - Services ([`CurrentUserService`], [`RepositoryService`],
//!   [`AnalysisService`]) map API areas onto typed calls.
//! - [`ApiKeyAuthTransport`] wraps any transport and stamps the credential
//!   header onto every request it executes.
//!
//! # Configuration
//!
//! [`TenableClient::from_env`] reads:
//!
//! - `SC05_URL` (required) - Base URL of the Tenable.sc instance
//! - `SC05_ACCESS_KEY` (required) - API access key
//! - `SC05_SECRET_KEY` (required) - API secret key
//!
//! Use [`ClientConfig`] to set the timeout, user agent, or TLS verification.

mod auth;
mod client;
mod config;
mod error;
mod models;
mod pagination;
pub mod response;
mod services;
mod transport;

pub mod cli;
mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{AuthScheme, Credentials, ACCESS_KEY_ENV, API_KEY_HEADER, SECRET_KEY_ENV};
pub use client::TenableClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::{ApiError, Result, TenableError};
pub use output::PrettyPrint;
pub use pagination::{OffsetWindow, DEFAULT_PAGE_SIZE};
pub use transport::{ApiKeyAuthTransport, Transport};

// Re-export services
pub use services::{AnalysisService, Authentication, CurrentUserService, RepositoryService};

// Re-export models
pub use models::{
    // Shared types
    Envelope,
    ResourceId,
    // User types
    CurrentUserResponse,
    Organization,
    Preference,
    Role,
    User,
    // Repository types
    Repository,
    RepositoryQuery,
    RepositoryResponse,
    RepositoryType,
    // Analysis types
    Analysis,
    AnalysisFilter,
    AnalysisQuery,
    AnalysisRequest,
    AnalysisResponse,
    AnalysisResultSet,
    Column,
    Family,
    Severity,
    VprContext,
    CUMULATIVE_SOURCE,
    LIST_VULN_TOOL,
    VULN_TYPE,
};
