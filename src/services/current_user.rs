//! `GET /rest/currentUser`.

use crate::client::TenableClient;
use crate::error::Result;
use crate::models::{CurrentUserResponse, User};

const CURRENT_USER_PATH: &str = "/rest/currentUser";

/// Operations on the authenticated user.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: &tenable::TenableClient) -> tenable::Result<()> {
/// let user = client.current_user().get().await?;
/// println!("Logged in as {:?}", user.username);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUserService<'a> {
    client: &'a TenableClient,
}

impl<'a> CurrentUserService<'a> {
    pub(crate) fn new(client: &'a TenableClient) -> Self {
        Self { client }
    }

    /// Fetch the user the API keys belong to.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self) -> Result<User> {
        Ok(self.get_envelope().await?.into_response())
    }

    /// Fetch the full response envelope.
    #[tracing::instrument(skip(self))]
    pub async fn get_envelope(&self) -> Result<CurrentUserResponse> {
        self.client.get(CURRENT_USER_PATH).await
    }
}
