//! Request execution seam.
//!
//! [`TenableClient`](crate::TenableClient) builds `reqwest::Request` values
//! and hands them to a [`Transport`] for execution. `reqwest::Client` is the
//! default transport; [`ApiKeyAuthTransport`] decorates any transport with
//! the API-key header.

use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::auth::{AuthScheme, Credentials};
use crate::error::Result;

/// Executes a fully built HTTP request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response, whatever its status.
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(reqwest::Client::execute(self, request).await?)
    }
}

/// Transport decorator that attaches the `X-Apikey` header to every request.
///
/// Useful when the same credentials must accompany requests that are not
/// built by [`TenableClient`](crate::TenableClient).
///
/// # Example
///
/// ```no_run
/// use tenable::{ApiKeyAuthTransport, Credentials, Transport};
///
/// # async fn example() -> tenable::Result<()> {
/// let transport = ApiKeyAuthTransport::new(
///     reqwest::Client::new(),
///     Credentials::new("access", "secret"),
/// );
/// let request = reqwest::Request::new(
///     reqwest::Method::GET,
///     "https://sc.example.com/rest/system".parse().unwrap(),
/// );
/// let response = transport.execute(request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyAuthTransport<T = reqwest::Client> {
    inner: T,
    scheme: AuthScheme,
}

impl<T: Transport> ApiKeyAuthTransport<T> {
    /// Wrap `inner`, authenticating with `credentials`.
    pub fn new(inner: T, credentials: Credentials) -> Self {
        Self {
            inner,
            scheme: AuthScheme::ApiKey(credentials),
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for ApiKeyAuthTransport<T> {
    async fn execute(&self, mut request: Request) -> Result<Response> {
        let (name, value) = self.scheme.header()?;
        request.headers_mut().insert(name, value);
        self.inner.execute(request).await
    }
}
