//! Authentication
//!
//! Password hashing/policy and signed token issuance.

pub mod password_service;
pub mod token_service;

pub use password_service::{Argon2Config, PasswordPolicy, PasswordService};
pub use token_service::{IssuedToken, TokenClaims, TokenService};
