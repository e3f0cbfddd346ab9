//! Authentication state.
//!
//! Tenable.sc API keys are sent with every request; there is no login
//! exchange. "Authenticated" here only means a complete credential pair is
//! configured.

use crate::auth::{AuthScheme, Credentials};

/// Tracks which credentials, if any, are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authentication {
    scheme: Option<AuthScheme>,
}

impl Authentication {
    /// State holding `scheme`.
    pub fn new(scheme: AuthScheme) -> Self {
        Self {
            scheme: Some(scheme),
        }
    }

    /// Use API-key authentication.
    pub fn set_api_key_auth(&mut self, access_key: impl Into<String>, secret_key: impl Into<String>) {
        self.scheme = Some(AuthScheme::ApiKey(Credentials::new(access_key, secret_key)));
    }

    /// The configured scheme.
    pub fn scheme(&self) -> Option<&AuthScheme> {
        self.scheme.as_ref()
    }

    /// Whether a complete credential pair is configured.
    pub fn is_authenticated(&self) -> bool {
        self.scheme.as_ref().is_some_and(AuthScheme::is_complete)
    }
}
