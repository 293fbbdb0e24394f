//! Principal Aggregate
//!
//! Authentication identity management. The `IdentityGateway` trait is the
//! interface the orchestration layer consumes; `IdentityService` is the
//! MongoDB-backed implementation.

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod service;

// Re-export main types
pub use entity::{Principal, StoredClaim};
pub use gateway::IdentityGateway;
pub use repository::PrincipalRepository;
pub use service::IdentityService;
