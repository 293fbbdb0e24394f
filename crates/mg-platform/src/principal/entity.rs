//! Principal Entity
//!
//! An authentication identity: unique username and email, an opaque password
//! credential, assigned role names, and any claims stored against the
//! principal. Principals are owned exclusively by the identity subsystem;
//! catalog records reference them by id only.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::ids::IdGenerator;

/// A name/value pair stored against a principal and carried into issued
/// tokens. Duplicate names are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredClaim {
    pub name: String,
    pub value: String,
}

impl StoredClaim {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Principal entity - an authentication identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Time-sorted id as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Login name (unique)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2id password hash. Opaque to everything outside the identity
    /// subsystem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Assigned role names
    #[serde(default)]
    pub roles: Vec<String>,

    /// Claims stored against this principal
    #[serde(default)]
    pub claims: Vec<StoredClaim>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: IdGenerator::next(),
            username: username.into(),
            email: email.into(),
            password_hash: None,
            roles: Vec::new(),
            claims: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
