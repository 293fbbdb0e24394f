//! Media Storage
//!
//! Filesystem storage for uploaded store images.

pub mod storage;

pub use storage::MediaStorage;
