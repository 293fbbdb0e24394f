//! Identity Gateway
//!
//! Interface boundary to the authentication principal store. The registration
//! saga and the catalog service consume this trait; `IdentityService` is the
//! production implementation and tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::principal::entity::{Principal, StoredClaim};
use crate::shared::error::Result;

#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Look up a principal by email. `None` when unregistered.
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>>;

    /// Look up a principal by username. `None` when unregistered.
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;

    /// Create a principal with the given credentials.
    ///
    /// Fails with `PlatformError::CredentialPolicy` carrying one
    /// human-readable description per violation when the credential store
    /// rejects the password, and with `Duplicate`/`Database` errors when
    /// persistence fails.
    async fn create(&self, username: &str, email: &str, password: &str) -> Result<Principal>;

    /// Assign a role to an existing principal.
    async fn add_role(&self, principal: &Principal, role: &str) -> Result<()>;

    /// Delete a principal. Best-effort; used for saga rollback and for the
    /// catalog delete cascade.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Verify a password against the principal's stored credential.
    async fn check_password(&self, principal: &Principal, password: &str) -> Result<bool>;

    /// Claims currently stored against the principal.
    async fn claims(&self, principal: &Principal) -> Result<Vec<StoredClaim>>;

    /// Role names currently assigned to the principal.
    async fn roles(&self, principal: &Principal) -> Result<Vec<String>>;
}
