//! Client configuration.
//!
//! [`ClientConfig`] collects everything needed to build a
//! [`TenableClient`]. The core constructors take explicit values;
//! [`ClientConfig::from_env`] is the convenience layer that reads the
//! process environment.

use std::env;
use std::time::Duration;

use crate::auth::Credentials;
use crate::client::TenableClient;
use crate::error::{Result, TenableError};

/// Environment variable holding the Tenable.sc base URL.
pub const BASE_URL_ENV: &str = "SC05_URL";

/// Default per-request timeout applied by the HTTP stack.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("tenable/", env!("CARGO_PKG_VERSION"));

/// Settings used to build a [`TenableClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use tenable::{ClientConfig, Credentials};
///
/// # fn example() -> tenable::Result<()> {
/// let client = ClientConfig::new("https://sc.example.com", Credentials::new("ak", "sk"))
///     .with_timeout(Duration::from_secs(60))
///     .with_accept_invalid_certs(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Tenable.sc instance (e.g. `https://sc.example.com/`).
    pub base_url: String,
    /// API key pair.
    pub credentials: Credentials,
    /// Timeout for each request, enforced by `reqwest`.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Skip TLS certificate verification (self-signed appliances).
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a configuration with default timeout and TLS settings.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// Uses `SC05_URL`, `SC05_ACCESS_KEY` and `SC05_SECRET_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::ConfigMissing`] if any of them is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                TenableError::ConfigMissing(format!(
                    "{BASE_URL_ENV} environment variable not set"
                ))
            })?;

        Ok(Self::new(base_url, credentials))
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the `reqwest` client described by this configuration.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(TenableError::Http)
    }

    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the credentials cannot
    /// be sent as a header.
    pub fn build(&self) -> Result<TenableClient> {
        TenableClient::with_transport(
            &self.base_url,
            self.credentials.clone(),
            self.http_client()?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ACCESS_KEY_ENV, SECRET_KEY_ENV};
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (BASE_URL_ENV, "https://sc.example.com"),
            (ACCESS_KEY_ENV, "foo"),
            (SECRET_KEY_ENV, "bar"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://sc.example.com");
        assert_eq!(config.credentials.access_key(), "foo");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_missing_credentials_fail_before_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "https://sc")]))
            .unwrap_err();
        match err {
            TenableError::ConfigMissing(msg) => assert!(msg.contains(ACCESS_KEY_ENV)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (ACCESS_KEY_ENV, "foo"),
            (SECRET_KEY_ENV, "bar"),
        ]))
        .unwrap_err();
        match err {
            TenableError::ConfigMissing(msg) => assert!(msg.contains(BASE_URL_ENV)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::new("https://sc", Credentials::new("a", "b"))
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("custom/1.0")
            .with_accept_invalid_certs(true);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "custom/1.0");
        assert!(config.accept_invalid_certs);
        assert!(config.build().is_ok());
    }
}
