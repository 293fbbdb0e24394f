//! Onboarding Models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::auth::token_service::IssuedToken;
use crate::principal::entity::Principal;
use crate::store::entity::RestaurantDraft;

/// Desired login credentials for a new store operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input to the registration saga: credentials plus the restaurant payload
/// that will be linked to the new principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub credentials: Credentials,
    pub restaurant: RestaurantDraft,
}

/// Outcome of registration or login.
///
/// Exactly one of the two shapes holds: a failure carries `message` and
/// nothing else; a success carries the identity and token fields with
/// `is_authenticated` set. The HTTP-facing layer maps `message` to a client
/// error response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<DateTime<Local>>,

    pub is_authenticated: bool,
}

impl AuthResult {
    /// A failed outcome carrying only a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            principal_id: None,
            username: None,
            email: None,
            roles: Vec::new(),
            token: None,
            expires_on: None,
            is_authenticated: false,
        }
    }

    /// A successful outcome for the given principal and issued token.
    pub fn authenticated(principal: &Principal, roles: Vec<String>, issued: IssuedToken) -> Self {
        Self {
            message: None,
            principal_id: Some(principal.id.clone()),
            username: Some(principal.username.clone()),
            email: Some(principal.email.clone()),
            roles,
            token: Some(issued.token),
            expires_on: Some(issued.expires_on),
            is_authenticated: true,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_shape() {
        let result = AuthResult::failure("Email is already registered!");
        assert!(result.is_failure());
        assert!(!result.is_authenticated);
        assert!(result.token.is_none());
        assert!(result.roles.is_empty());
    }

    #[test]
    fn test_failure_serializes_without_token_fields() {
        let json = serde_json::to_value(AuthResult::failure("nope")).unwrap();
        assert_eq!(json["message"], "nope");
        assert!(json.get("token").is_none());
        assert!(json.get("principalId").is_none());
    }
}
