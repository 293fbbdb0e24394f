//! Token Service
//!
//! Builds a claim sequence for a principal, signs it with a symmetric key
//! (HS256), and serializes a compact bearer token with an expiry.
//!
//! Claim assembly is a *sequence*, not a set: the standard claims, the
//! principal's stored claims, and one `roles` claim per assigned role are
//! concatenated without deduplication. A name that occurs more than once is
//! encoded in the payload as a JSON array in occurrence order, so downstream
//! consumers can read the first or all matching values.

use chrono::{DateTime, Duration, Local};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use mg_config::JwtSettings;

use crate::principal::entity::{Principal, StoredClaim};
use crate::shared::error::{PlatformError, Result};

/// Claim name carrying role assignments.
const ROLES_CLAIM: &str = "roles";

/// A signed token plus its expiry instant.
///
/// The expiry is computed against the signing host's local clock, matching
/// the behavior of the system this replaces. The `exp` claim inside the token
/// is an absolute Unix timestamp either way.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_on: DateTime<Local>,
}

/// Claims recovered from a validated token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub jti: String,
    #[serde(default)]
    pub email: Option<String>,
    pub uid: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub roles: Vec<String>,
}

/// A repeated claim name is an array; a single occurrence is a bare string.
fn string_or_seq<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Token issuance and validation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    duration_days: f64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("duration_days", &self.duration_days)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service from configuration.
    ///
    /// Fails with a configuration error when the signing key is absent or the
    /// validity duration is missing or not a valid number; neither may fall
    /// back to a silent default.
    pub fn new(settings: &JwtSettings) -> Result<Self> {
        let key = settings
            .key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| PlatformError::configuration("JWT signing key is not configured"))?;

        let duration_raw = settings.duration_in_days.as_deref().ok_or_else(|| {
            PlatformError::configuration("JWT duration_in_days is not configured")
        })?;
        let duration_days: f64 = duration_raw.trim().parse().map_err(|_| {
            PlatformError::configuration(format!(
                "JWT duration_in_days is not a valid number: '{}'",
                duration_raw
            ))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            duration_days,
        })
    }

    /// Issue a signed token for a principal. No side effects.
    pub fn issue(
        &self,
        principal: &Principal,
        roles: &[String],
        stored_claims: &[StoredClaim],
    ) -> Result<IssuedToken> {
        // Standard claims, then stored claims, then one claim per role.
        // Duplicates across the three groups are preserved.
        let mut sequence: Vec<(String, String)> = vec![
            ("sub".to_string(), principal.username.clone()),
            ("jti".to_string(), Uuid::new_v4().to_string()),
            ("email".to_string(), principal.email.clone()),
            ("uid".to_string(), principal.id.clone()),
        ];
        sequence.extend(
            stored_claims
                .iter()
                .map(|c| (c.name.clone(), c.value.clone())),
        );
        sequence.extend(roles.iter().map(|r| (ROLES_CLAIM.to_string(), r.clone())));

        // Local clock, not UTC; the day count may be fractional.
        let expires_on =
            Local::now() + Duration::milliseconds((self.duration_days * 86_400_000.0) as i64);

        let mut payload = Map::new();
        payload.insert("iss".to_string(), json!(self.issuer));
        payload.insert("aud".to_string(), json!(self.audience));
        payload.insert("exp".to_string(), json!(expires_on.timestamp()));
        for (name, value) in sequence {
            match payload.get_mut(&name) {
                None => {
                    payload.insert(name, Value::String(value));
                }
                Some(Value::Array(values)) => values.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
            }
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Value::Object(payload),
            &self.encoding_key,
        )
        .map_err(|e| PlatformError::token_issuance(format!("Failed to encode token: {}", e)))?;

        Ok(IssuedToken { token, expires_on })
    }

    /// Validate a token's signature, issuer, audience, and expiry.
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| PlatformError::token_issuance(format!("Invalid token: {}", e)))
    }
}
