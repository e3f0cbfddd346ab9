//! `GET /rest/repository`.

use crate::client::TenableClient;
use crate::error::Result;
use crate::models::{Repository, RepositoryQuery, RepositoryResponse};

/// Operations on repositories.
#[derive(Debug, Clone, Copy)]
pub struct RepositoryService<'a> {
    client: &'a TenableClient,
}

impl<'a> RepositoryService<'a> {
    pub(crate) fn new(client: &'a TenableClient) -> Self {
        Self { client }
    }

    /// List repositories matching `query`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tenable::{RepositoryQuery, RepositoryType};
    ///
    /// # async fn example(client: &tenable::TenableClient) -> tenable::Result<()> {
    /// let query = RepositoryQuery::default()
    ///     .with_type(RepositoryType::Local)
    ///     .with_fields(["id", "name"]);
    /// for repo in client.repositories().list(&query).await? {
    ///     println!("{:?}", repo.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &RepositoryQuery) -> Result<Vec<Repository>> {
        Ok(self.list_envelope(query).await?.into_response())
    }

    /// List repositories from raw `type` and comma-separated `fields` strings.
    ///
    /// An empty type lists all repositories; empty fields are not sent.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, repository_type: &str, fields: &str) -> Result<Vec<Repository>> {
        let query = RepositoryQuery::from_parts(repository_type, fields)?;
        self.list(&query).await
    }

    /// List repositories and return the full response envelope.
    #[tracing::instrument(skip(self))]
    pub async fn list_envelope(&self, query: &RepositoryQuery) -> Result<RepositoryResponse> {
        self.client.get(&query.path()).await
    }
}
