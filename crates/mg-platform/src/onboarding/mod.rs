//! Onboarding
//!
//! The store-registration saga: principal creation, token issuance, and
//! restaurant persistence as one all-or-nothing operation.

pub mod models;
pub mod service;

// Re-export main types
pub use models::{AuthResult, Credentials, RegistrationRequest};
pub use service::RegistrationService;
