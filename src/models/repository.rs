//! Repository model and query parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::envelope::Envelope;
use super::id::ResourceId;
use crate::error::{Result, TenableError};

/// Envelope returned by `GET /rest/repository`.
pub type RepositoryResponse = Envelope<Vec<Repository>>;

/// A Tenable.sc repository.
///
/// Only the fields requested through [`RepositoryQuery::fields`] are present;
/// the rest decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository ID.
    #[serde(default)]
    pub id: Option<ResourceId>,

    /// Repository name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Data format (e.g. `"IPv4"`, `"agent"`).
    #[serde(default)]
    pub data_format: Option<String>,

    /// Repository type (e.g. `"Local"`).
    #[serde(rename = "type", default)]
    pub repository_type: Option<String>,

    /// Repository UUID.
    #[serde(default)]
    pub uuid: Option<String>,
}

impl Repository {
    /// The repository ID as an integer, if present.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::InvalidId`] if the ID is not numeric.
    pub fn numeric_id(&self) -> Result<Option<i64>> {
        self.id.as_ref().map(ResourceId::as_i64).transpose()
    }
}

/// Repository type filter for [`RepositoryQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RepositoryType {
    /// Every repository.
    #[default]
    All,
    /// Repositories fed by local scanners.
    Local,
    /// Repositories synchronized from a remote instance.
    Remote,
    /// Repositories imported offline.
    Offline,
    /// Any other type name, forwarded to the server as given.
    Other(String),
}

impl RepositoryType {
    /// The value sent in the `type` query parameter.
    pub fn as_str(&self) -> &str {
        match self {
            RepositoryType::All => "All",
            RepositoryType::Local => "Local",
            RepositoryType::Remote => "Remote",
            RepositoryType::Offline => "Offline",
            RepositoryType::Other(name) => name,
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepositoryType {
    type Err = TenableError;

    /// Known names are case-insensitive and the empty string means
    /// [`RepositoryType::All`]. Other names pass through unchanged as long as
    /// they are a single word.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(RepositoryType::All),
            "local" => Ok(RepositoryType::Local),
            "remote" => Ok(RepositoryType::Remote),
            "offline" => Ok(RepositoryType::Offline),
            _ if name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') =>
            {
                Ok(RepositoryType::Other(name.to_string()))
            }
            _ => Err(TenableError::InvalidArgument(format!(
                "invalid repository type '{s}': expected a single word such as All or Local"
            ))),
        }
    }
}

/// Query parameters for listing repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryQuery {
    /// Repository type filter. Defaults to [`RepositoryType::All`].
    pub repository_type: RepositoryType,

    /// Fields to return. Empty means the server's default field set.
    pub fields: Vec<String>,
}

impl RepositoryQuery {
    /// Build a query from raw `type` and comma-separated `fields` strings.
    ///
    /// An empty type means `All`; empty field names are dropped.
    pub fn from_parts(repository_type: &str, fields: &str) -> Result<Self> {
        Ok(Self {
            repository_type: repository_type.parse()?,
            fields: fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// Restrict to one repository type.
    #[must_use]
    pub fn with_type(mut self, repository_type: RepositoryType) -> Self {
        self.repository_type = repository_type;
        self
    }

    /// Request specific fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Request path including the query string.
    ///
    /// `fields` is appended only when at least one field is requested.
    pub fn path(&self) -> String {
        let mut path = format!(
            "rest/repository?type={}",
            urlencoding::encode(self.repository_type.as_str())
        );
        if !self.fields.is_empty() {
            let fields: Vec<_> = self
                .fields
                .iter()
                .map(|f| urlencoding::encode(f))
                .collect();
            path.push_str("&fields=");
            path.push_str(&fields.join(","));
        }
        path
    }
}
