//! Platform Error Types

use thiserror::Error;

/// Fold credential error descriptions into one message. Each description is
/// terminated by a comma, including the last one; clients parse that shape.
pub(crate) fn describe_credential_errors(errors: &[String]) -> String {
    errors
        .iter()
        .fold(String::new(), |acc, error| acc + error + ",")
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate {
        entity_type: String,
        field: String,
        value: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Aggregated human-readable credential errors from the identity store
    /// (password policy violations, persistence rejections).
    #[error("Credential error: {}", describe_credential_errors(.0))]
    CredentialPolicy(Vec<String>),

    #[error("Token issuance failed: {message}")]
    TokenIssuance { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(
        entity_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn token_issuance(message: impl Into<String>) -> Self {
        Self::TokenIssuance {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is a duplicate-key conflict from the backing store.
    /// MongoDB surfaces unique-index violations as write error code 11000.
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            Self::Duplicate { .. } => true,
            Self::Database(err) => {
                matches!(
                    err.kind.as_ref(),
                    mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
                        write_error,
                    )) if write_error.code == 11000
                )
            }
            _ => false,
        }
    }
}

/// Result type alias using PlatformError
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_policy_joins_with_commas() {
        let err = PlatformError::CredentialPolicy(vec![
            "Passwords must be at least 6 characters.".to_string(),
            "Passwords must have at least one digit ('0'-'9').".to_string(),
        ]);
        let text = err.to_string();
        assert!(text.contains("characters.,Passwords"));
        // Every description carries its own comma, the last one included.
        assert!(text.ends_with("('0'-'9').,"));
    }

    #[test]
    fn test_not_found_accepts_numeric_ids() {
        let err = PlatformError::not_found("Restaurant", 42);
        assert_eq!(err.to_string(), "Restaurant not found: 42");
    }
}
