//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Tenable.sc API server.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Analysis, Credentials, Repository, RepositoryType, User};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// User returned by `/rest/currentUser`. `None` answers 403.
    pub current_user: Option<User>,

    /// Repositories in insertion order.
    pub repositories: Vec<Repository>,

    /// Vulnerability rows served by `/rest/analysis`.
    pub vulnerabilities: Vec<Analysis>,

    /// Optional key pair. If set, requests must carry a matching `X-Apikey`.
    pub required_credentials: Option<Credentials>,

    /// Number of API requests served, including rejected ones.
    pub request_count: usize,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Set the current user.
    pub fn with_current_user(mut self, user: User) -> Self {
        self.current_user = Some(user);
        self
    }

    /// Add a repository.
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Add a vulnerability row.
    pub fn with_vulnerability(mut self, vulnerability: Analysis) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    /// Require requests to authenticate with `credentials`.
    pub fn with_required_credentials(mut self, credentials: Credentials) -> Self {
        self.required_credentials = Some(credentials);
        self
    }

    /// Whether an `X-Apikey` header value is accepted.
    pub fn is_authorized(&self, api_key: Option<&str>) -> bool {
        match &self.required_credentials {
            None => true,
            Some(required) => api_key == Some(required.header_string().as_str()),
        }
    }

    /// List repositories of the given type.
    pub fn list_repositories(&self, repository_type: &RepositoryType) -> Vec<&Repository> {
        self.repositories
            .iter()
            .filter(|r| match repository_type {
                RepositoryType::All => true,
                other => r
                    .repository_type
                    .as_deref()
                    .map(|t| t.eq_ignore_ascii_case(other.as_str()))
                    .unwrap_or(false),
            })
            .collect()
    }

    /// List vulnerabilities, optionally restricted to some plugin IDs.
    pub fn list_vulnerabilities(&self, plugin_ids: &[String]) -> Vec<&Analysis> {
        self.vulnerabilities
            .iter()
            .filter(|v| {
                plugin_ids.is_empty()
                    || v.plugin_id
                        .as_ref()
                        .map(|id| plugin_ids.contains(id))
                        .unwrap_or(false)
            })
            .collect()
    }
}
