//! Tenable.sc API client.
//!
//! Low-level client that builds authenticated requests, sends them through a
//! [`Transport`], and decodes the responses. Resource operations live on the
//! services returned by [`TenableClient::current_user`],
//! [`TenableClient::repositories`] and [`TenableClient::analysis`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::{AuthScheme, Credentials, API_KEY_HEADER};
use crate::config::ClientConfig;
use crate::error::{Result, TenableError};
use crate::response;
use crate::services::{AnalysisService, Authentication, CurrentUserService, RepositoryService};
use crate::transport::Transport;

/// Low-level Tenable.sc API client.
///
/// This struct is cheaply cloneable; clones share the same transport and
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use tenable::{Credentials, TenableClient};
///
/// # async fn example() -> tenable::Result<()> {
/// // Create from environment variables
/// let client = TenableClient::from_env()?;
///
/// // Or configure manually
/// let client = TenableClient::new(
///     "https://sc.example.com",
///     Credentials::new("access-key", "secret-key"),
/// )?;
/// let user = client.current_user().get().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TenableClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<Url>,
    credentials: Credentials,
    api_key: HeaderValue,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for TenableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenableClient")
            .field("base_url", &self.base_url.as_str())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl TenableClient {
    /// Create a client from `SC05_URL`, `SC05_ACCESS_KEY` and `SC05_SECRET_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::ConfigMissing`] if any variable is missing.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env()?.build()
    }

    /// Create a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        ClientConfig::new(base_url, credentials).build()
    }

    /// Create a client that executes requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the credentials cannot
    /// be encoded as a header.
    pub fn with_transport<T>(base_url: &str, credentials: Credentials, transport: T) -> Result<Self>
    where
        T: Transport + 'static,
    {
        let base_url = normalize_base_url(base_url)?;
        let api_key = credentials.header_value()?;

        Ok(Self {
            transport: Arc::new(transport),
            base_url: Arc::new(base_url),
            credentials,
            api_key,
            deadline: None,
        })
    }

    /// Get the base URL. It always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the credentials this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return a client whose requests carry `deadline` as their timeout.
    #[must_use]
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    /// Current-user operations.
    pub fn current_user(&self) -> CurrentUserService<'_> {
        CurrentUserService::new(self)
    }

    /// Repository operations.
    pub fn repositories(&self) -> RepositoryService<'_> {
        RepositoryService::new(self)
    }

    /// Analysis operations.
    pub fn analysis(&self) -> AnalysisService<'_> {
        AnalysisService::new(self)
    }

    /// Authentication state of this client. No request is made.
    pub fn authentication(&self) -> Authentication {
        Authentication::new(AuthScheme::ApiKey(self.credentials.clone()))
    }

    /// Resolve a path relative to the base URL.
    ///
    /// Leading `/` are stripped, so absolute paths and full URLs keep the
    /// base URL's scheme, host and path prefix. Dot segments are still
    /// applied: `../` climbs above the base path.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(&format!("./{relative}"))
            .map_err(|source| TenableError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    /// Build an authenticated request.
    ///
    /// `body`, when present, is serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::Serialization`] if the body cannot be encoded
    /// and [`TenableError::InvalidPath`] if the path cannot be resolved.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let url = self.resolve(path)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(TenableError::Serialization)?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, self.api_key.clone());

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        if let Some(deadline) = self.deadline {
            *request.timeout_mut() = Some(deadline);
        }

        Ok(request)
    }

    /// Send a built request and return the raw response.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send(&self, request: Request) -> Result<Response> {
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status().as_u16(), "received response");
        Ok(response)
    }

    /// GET `path` and decode the body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.build_request::<()>(Method::GET, path, None)?;
        response::decode(self.send(request).await?).await
    }

    /// POST `body` as JSON to `path` and decode the response into `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, path, Some(body))?;
        response::decode(self.send(request).await?).await
    }

    /// Make a request whose response body is not needed.
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let request = self.build_request(method, path, body)?;
        response::discard(self.send(request).await?).await
    }
}

/// Parse `base_url`, making sure its path ends with exactly one `/`.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let invalid = |reason: String| TenableError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry relative paths".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not have a query or fragment".to_string()));
    }

    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);

    Ok(url)
}
