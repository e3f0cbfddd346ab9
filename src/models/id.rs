//! Resource identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TenableError};

/// A resource identifier as returned by Tenable.sc.
///
/// The API returns IDs as JSON numbers on some endpoints and as strings on
/// others. Use [`ResourceId::as_i64`] to get the canonical integer form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric ID (e.g. `5`).
    Integer(i64),
    /// Textual ID (e.g. `"5"`).
    Text(String),
}

impl ResourceId {
    /// Normalize the ID to an integer.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::InvalidId`] if a textual ID is not an integer.
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            ResourceId::Integer(id) => Ok(*id),
            ResourceId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| TenableError::InvalidId(text.clone())),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Integer(id) => write!(f, "{id}"),
            ResourceId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Integer(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}
