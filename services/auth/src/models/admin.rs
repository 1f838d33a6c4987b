//! Admin model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Admin entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: String,
    #[serde(rename = "felhasznalonev")]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "letrehozva")]
    pub created_at: DateTime<Utc>,
}

/// Identity carried by a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    #[serde(rename = "felhasznalonev")]
    pub username: String,
}

/// Admin login credentials
///
/// Both fields are optional on the wire so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCredentials {
    #[serde(rename = "felhasznalonev")]
    pub username: Option<String>,
    #[serde(rename = "jelszo")]
    pub password: Option<String>,
}

impl LoginCredentials {
    /// Return the username and password if both are present and non-empty
    pub fn required(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.trim().is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((username, password))
    }
}
