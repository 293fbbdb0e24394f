//! Identity Service
//!
//! MongoDB-backed implementation of `IdentityGateway`: password policy
//! enforcement, Argon2id hashing, and principal persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::password_service::PasswordService;
use crate::principal::entity::{Principal, StoredClaim};
use crate::principal::gateway::IdentityGateway;
use crate::principal::repository::PrincipalRepository;
use crate::shared::error::{PlatformError, Result};

pub struct IdentityService {
    repository: Arc<PrincipalRepository>,
    passwords: PasswordService,
}

impl IdentityService {
    pub fn new(repository: Arc<PrincipalRepository>, passwords: PasswordService) -> Self {
        Self {
            repository,
            passwords,
        }
    }
}

#[async_trait]
impl IdentityGateway for IdentityService {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        self.repository.find_by_email(email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        self.repository.find_by_username(username).await
    }

    async fn create(&self, username: &str, email: &str, password: &str) -> Result<Principal> {
        if let Err(errors) = self.passwords.policy().validate(password) {
            return Err(PlatformError::CredentialPolicy(errors));
        }

        let hash = self.passwords.hash_password(password)?;
        let principal = Principal::new(username, email).with_password_hash(hash);

        match self.repository.insert(&principal).await {
            Ok(()) => {
                debug!(principal_id = %principal.id, "Principal created");
                Ok(principal)
            }
            Err(err) if err.is_duplicate_key() => {
                // Unique-index conflict: a concurrent registration won the
                // check-then-create race. Surface it as the duplicate it is.
                warn!(username, email, "Duplicate principal rejected by unique index");
                Err(PlatformError::CredentialPolicy(vec![format!(
                    "Username '{}' or email '{}' is already taken.",
                    username, email
                )]))
            }
            Err(err) => Err(err),
        }
    }

    async fn add_role(&self, principal: &Principal, role: &str) -> Result<()> {
        self.repository.add_role(&principal.id, role).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        Ok(())
    }

    async fn check_password(&self, principal: &Principal, password: &str) -> Result<bool> {
        match principal.password_hash.as_deref() {
            Some(hash) => self.passwords.verify_password(password, hash),
            None => Ok(false),
        }
    }

    async fn claims(&self, principal: &Principal) -> Result<Vec<StoredClaim>> {
        // Re-read so claims added since the principal was loaded are included.
        Ok(self
            .repository
            .find_by_id(&principal.id)
            .await?
            .map(|p| p.claims)
            .unwrap_or_else(|| principal.claims.clone()))
    }

    async fn roles(&self, principal: &Principal) -> Result<Vec<String>> {
        Ok(self
            .repository
            .find_by_id(&principal.id)
            .await?
            .map(|p| p.roles)
            .unwrap_or_else(|| principal.roles.clone()))
    }
}
