//! Mealgate Platform
//!
//! Backend logic for onboarding a restaurant operator:
//! - Identity management for authentication principals
//! - Atomic store registration (principal + restaurant as one logical unit,
//!   with principal rollback on any downstream failure)
//! - Signed bearer token issuance
//! - Restaurant catalog CRUD and sub-resource queries (orders, menu items,
//!   categories)
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access (MongoDB)
//! - `service` - Business operations
//!
//! The identity and catalog stores sit behind the `IdentityGateway` and
//! `CatalogStore` traits so the orchestration layer never depends on a
//! concrete backend.

// Core aggregates
pub mod principal;
pub mod store;

// Registration saga
pub mod onboarding;

// Authentication
pub mod auth;

// File storage
pub mod media;

// Shared infrastructure
pub mod shared;

// Re-export common types from shared
pub use shared::error::{PlatformError, Result};
pub use shared::ids::IdGenerator;

// Re-export main entity types for convenience
pub use principal::entity::{Principal, StoredClaim};
pub use principal::gateway::IdentityGateway;
pub use store::catalog::CatalogStore;
pub use store::entity::{Category, MenuItem, Order, OrderStatus, Restaurant, RestaurantDraft};

// Re-export services
pub use auth::password_service::{Argon2Config, PasswordPolicy, PasswordService};
pub use auth::token_service::{IssuedToken, TokenClaims, TokenService};
pub use media::storage::MediaStorage;
pub use onboarding::models::{AuthResult, Credentials, RegistrationRequest};
pub use onboarding::service::RegistrationService;
pub use principal::repository::PrincipalRepository;
pub use principal::service::IdentityService;
pub use store::repository::StoreRepository;
pub use store::service::StoreService;

/// Role assigned to a freshly registered store operator until the store is
/// approved.
pub const PENDING_STORE_ROLE: &str = "PendingStore";
