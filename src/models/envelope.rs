//! Response envelope shared by the Tenable.sc REST endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Outer wrapper of every Tenable.sc response.
///
/// The `response` payload differs per endpoint, so each endpoint gets its own
/// alias ([`CurrentUserResponse`](crate::CurrentUserResponse),
/// [`RepositoryResponse`](crate::RepositoryResponse),
/// [`AnalysisResponse`](crate::AnalysisResponse)).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Response type (e.g. `"regular"`).
    #[serde(rename = "type", default)]
    pub response_type: Option<String>,

    /// Endpoint payload.
    pub response: T,

    /// Vendor error code (0 on success).
    #[serde(default)]
    pub error_code: i64,

    /// Vendor error message (empty on success).
    #[serde(default)]
    pub error_msg: String,

    /// Non-fatal warnings.
    #[serde(default)]
    pub warnings: Vec<serde_json::Value>,

    /// Server time in epoch seconds.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub timestamp: Option<i64>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    pub fn into_response(self) -> T {
        self.response
    }

    /// Server time as a UTC date.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(|t| DateTime::from_timestamp(t, 0))
    }

    /// Whether the server reported any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
