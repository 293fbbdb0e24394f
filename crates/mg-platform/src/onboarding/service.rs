//! Registration Service
//!
//! Orchestrates store onboarding across the identity store, the token
//! service, and the catalog store. The sequence is fixed as
//! principal -> token -> restaurant so that every failure after principal
//! creation has exactly one compensation: delete the principal.
//!
//! No catalog record may ever exist without a valid linked principal, and no
//! principal may survive a failed onboarding.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::token_service::TokenService;
use crate::onboarding::models::{AuthResult, RegistrationRequest};
use crate::principal::entity::Principal;
use crate::principal::gateway::IdentityGateway;
use crate::shared::error::{describe_credential_errors, PlatformError};
use crate::shared::ids::IdGenerator;
use crate::store::catalog::CatalogStore;
use crate::PENDING_STORE_ROLE;

pub struct RegistrationService {
    identity: Arc<dyn IdentityGateway>,
    catalog: Arc<dyn CatalogStore>,
    tokens: Arc<TokenService>,
}

impl RegistrationService {
    pub fn new(
        identity: Arc<dyn IdentityGateway>,
        catalog: Arc<dyn CatalogStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            identity,
            catalog,
            tokens,
        }
    }

    /// Register a store operator: create the principal, issue a token, and
    /// persist the linked restaurant, all-or-nothing.
    ///
    /// Failures never cross this boundary as errors; every outcome is an
    /// `AuthResult`, with a single human-readable message on failure.
    pub async fn register(&self, request: RegistrationRequest) -> AuthResult {
        let credentials = &request.credentials;

        // Uniqueness pre-checks, email first. The unique index on the
        // principal store remains the authoritative backstop for concurrent
        // registrations that pass both checks.
        match self.identity.find_by_email(&credentials.email).await {
            Ok(Some(_)) => return AuthResult::failure("Email is already registered!"),
            Ok(None) => {}
            Err(err) => return AuthResult::failure(err.to_string()),
        }
        match self.identity.find_by_username(&credentials.username).await {
            Ok(Some(_)) => return AuthResult::failure("Username is already registered!"),
            Ok(None) => {}
            Err(err) => return AuthResult::failure(err.to_string()),
        }

        // Nothing has been created up to here, so failures need no rollback.
        let principal = match self
            .identity
            .create(
                &credentials.username,
                &credentials.email,
                &credentials.password,
            )
            .await
        {
            Ok(principal) => principal,
            Err(PlatformError::CredentialPolicy(errors)) => {
                return AuthResult::failure(describe_credential_errors(&errors));
            }
            Err(err) => return AuthResult::failure(err.to_string()),
        };

        // A principal now exists; every failure below compensates by
        // deleting it.
        if let Err(err) = self.identity.add_role(&principal, PENDING_STORE_ROLE).await {
            return self.roll_back(&principal, err).await;
        }

        let roles = vec![PENDING_STORE_ROLE.to_string()];
        let stored_claims = match self.identity.claims(&principal).await {
            Ok(claims) => claims,
            Err(err) => return self.roll_back(&principal, err).await,
        };
        let issued = match self.tokens.issue(&principal, &roles, &stored_claims) {
            Ok(issued) => issued,
            Err(err) => return self.roll_back(&principal, err).await,
        };

        let restaurant = request
            .restaurant
            .into_restaurant(IdGenerator::next_numeric(), principal.id.clone());
        if let Err(err) = self.catalog.insert(&restaurant).await {
            return self.roll_back(&principal, err).await;
        }

        info!(
            principal_id = %principal.id,
            restaurant_id = restaurant.id,
            "Store registered"
        );
        AuthResult::authenticated(&principal, roles, issued)
    }

    /// Authenticate an existing operator and issue a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult {
        const BAD_CREDENTIALS: &str = "Email or Password is incorrect!";

        let principal = match self.identity.find_by_email(email).await {
            Ok(Some(principal)) => principal,
            Ok(None) => return AuthResult::failure(BAD_CREDENTIALS),
            Err(err) => return AuthResult::failure(err.to_string()),
        };

        match self.identity.check_password(&principal, password).await {
            Ok(true) => {}
            Ok(false) => return AuthResult::failure(BAD_CREDENTIALS),
            Err(err) => return AuthResult::failure(err.to_string()),
        }

        let roles = match self.identity.roles(&principal).await {
            Ok(roles) => roles,
            Err(err) => return AuthResult::failure(err.to_string()),
        };
        let stored_claims = match self.identity.claims(&principal).await {
            Ok(claims) => claims,
            Err(err) => return AuthResult::failure(err.to_string()),
        };
        match self.tokens.issue(&principal, &roles, &stored_claims) {
            Ok(issued) => AuthResult::authenticated(&principal, roles, issued),
            Err(err) => AuthResult::failure(err.to_string()),
        }
    }

    /// Compensate a partial registration by deleting the created principal.
    ///
    /// Best-effort: a failing delete is logged and swallowed so the caller
    /// still receives the original failure message.
    async fn roll_back(&self, principal: &Principal, cause: PlatformError) -> AuthResult {
        if let Err(rollback_err) = self.identity.delete(&principal.id).await {
            warn!(
                principal_id = %principal.id,
                error = %rollback_err,
                "Rollback of registered principal failed; orphaned principal left behind"
            );
        } else {
            info!(principal_id = %principal.id, "Registration rolled back");
        }
        AuthResult::failure(cause.to_string())
    }
}
