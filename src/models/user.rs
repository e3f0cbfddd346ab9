//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::Envelope;
use super::id::ResourceId;

/// Envelope returned by `GET /rest/currentUser`.
pub type CurrentUserResponse = Envelope<User>;

/// A Tenable.sc user account.
///
/// Tenable.sc sends most scalar fields as strings, including timestamps
/// (epoch seconds) and booleans (`"true"`/`"false"`). They are kept as sent;
/// the helper methods interpret them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    #[serde(default)]
    pub id: Option<ResourceId>,

    /// Account status (`"0"` is active).
    #[serde(default)]
    pub status: Option<String>,

    /// Login name.
    #[serde(default)]
    pub username: Option<String>,

    /// LDAP login name.
    #[serde(default)]
    pub ldap_username: Option<String>,

    /// First name.
    #[serde(default)]
    pub firstname: Option<String>,

    /// Last name.
    #[serde(default)]
    pub lastname: Option<String>,

    /// Job title.
    #[serde(default)]
    pub title: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Street address.
    #[serde(default)]
    pub address: Option<String>,

    /// City.
    #[serde(default)]
    pub city: Option<String>,

    /// State or province.
    #[serde(default)]
    pub state: Option<String>,

    /// Country.
    #[serde(default)]
    pub country: Option<String>,

    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Fax number.
    #[serde(default)]
    pub fax: Option<String>,

    /// Creation time (epoch seconds).
    #[serde(default)]
    pub created_time: Option<String>,

    /// Last modification time (epoch seconds).
    #[serde(default)]
    pub modified_time: Option<String>,

    /// Last login time (epoch seconds).
    #[serde(default)]
    pub last_login: Option<String>,

    /// Address of the last login.
    #[serde(rename = "lastLoginIP", default)]
    pub last_login_ip: Option<String>,

    /// Whether the password must be changed at next login.
    #[serde(default)]
    pub must_change_password: Option<String>,

    /// Whether the account is locked.
    #[serde(default)]
    pub locked: Option<String>,

    /// Failed login counter.
    #[serde(rename = "failedLogins", default)]
    pub failed_logins: Option<String>,

    /// Authentication type (e.g. `"tns"`, `"ldap"`).
    #[serde(default)]
    pub auth_type: Option<String>,

    /// Certificate fingerprint.
    #[serde(default)]
    pub fingerprint: Option<String>,

    /// Password state (`"SET"` when a password exists).
    #[serde(default)]
    pub password: Option<String>,

    /// UI preferences.
    #[serde(default)]
    pub preferences: Vec<Preference>,

    /// Owning organization.
    #[serde(default)]
    pub organization: Option<Organization>,

    /// Organization name.
    #[serde(default)]
    pub org_name: Option<String>,

    /// Role of the user within the organization.
    #[serde(default)]
    pub role: Option<Role>,

    /// User preferences.
    #[serde(default)]
    pub user_prefs: Vec<Preference>,

    /// User UUID.
    #[serde(default)]
    pub uuid: Option<String>,
}

impl User {
    /// Full name, falling back to the username.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            self.username.clone()
        } else {
            Some(parts.join(" "))
        }
    }

    /// Whether the account is locked.
    pub fn is_locked(&self) -> bool {
        self.locked.as_deref() == Some("true")
    }

    /// Whether the password must be changed at next login.
    pub fn must_change_password(&self) -> bool {
        self.must_change_password.as_deref() == Some("true")
    }

    /// Creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch(self.created_time.as_deref())
    }

    /// Last modification time.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch(self.modified_time.as_deref())
    }

    /// Last login time. `None` if the user never logged in.
    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        parse_epoch(self.last_login.as_deref()).filter(|t| t.timestamp() > 0)
    }

    /// Look up a user preference by name.
    pub fn user_pref(&self, name: &str) -> Option<&str> {
        self.user_prefs
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .and_then(|p| p.value.as_deref())
    }
}

/// Parse an epoch-seconds string.
fn parse_epoch(value: Option<&str>) -> Option<DateTime<Utc>> {
    let secs = value?.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// A named preference value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// An organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A user role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
