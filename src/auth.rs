//! Credentials and authentication schemes.
//!
//! Tenable.sc authenticates API calls with a vendor-specific header:
//!
//! ```text
//! X-Apikey: accesskey=<access key>; secretkey=<secret key>;
//! ```

use std::env;
use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{Result, TenableError};

/// Environment variable holding the API access key.
pub const ACCESS_KEY_ENV: &str = "SC05_ACCESS_KEY";

/// Environment variable holding the API secret key.
pub const SECRET_KEY_ENV: &str = "SC05_SECRET_KEY";

/// Name of the API-key header.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-apikey");

/// An access-key/secret-key pair.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from an access key and a secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials from `SC05_ACCESS_KEY` and `SC05_SECRET_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::ConfigMissing`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// `from_env` is this function over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ACCESS_KEY_ENV).filter(|v| !v.is_empty());
        let secret_key = lookup(SECRET_KEY_ENV).filter(|v| !v.is_empty());

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Self::new(access_key, secret_key)),
            _ => Err(TenableError::ConfigMissing(format!(
                "{ACCESS_KEY_ENV} and {SECRET_KEY_ENV} environment variables must be set"
            ))),
        }
    }

    /// The access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key. Only read this to put it on the wire.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Whether both halves of the pair are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }

    /// The raw `X-Apikey` header value.
    pub fn header_string(&self) -> String {
        format!(
            "accesskey={}; secretkey={};",
            self.access_key, self.secret_key
        )
    }

    /// The `X-Apikey` header value, marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::InvalidHeader`] if a key contains characters
    /// that are not allowed in a header.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.header_string()).map_err(|_| {
            TenableError::InvalidHeader(
                "access key and secret key must be visible ASCII".to_string(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// A supported way of authenticating against Tenable.sc.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthScheme {
    /// Access-key/secret-key pair sent in the `X-Apikey` header.
    ApiKey(Credentials),
}

impl AuthScheme {
    /// The header this scheme attaches to every request.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        match self {
            AuthScheme::ApiKey(credentials) => Ok((API_KEY_HEADER, credentials.header_value()?)),
        }
    }

    /// Whether the scheme carries everything it needs to authenticate.
    pub fn is_complete(&self) -> bool {
        match self {
            AuthScheme::ApiKey(credentials) => credentials.is_complete(),
        }
    }
}
