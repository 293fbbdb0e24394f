//! Shared Infrastructure
//!
//! Error types and id generation used across aggregates.

pub mod error;
pub mod ids;

pub use error::{PlatformError, Result};
pub use ids::IdGenerator;
