//! Mealgate shared infrastructure.
//!
//! Currently hosts the logging bootstrap used by services and tools.
//! Domain types live in `mg-platform`; configuration lives in `mg-config`.

pub mod logging;

pub use logging::init_logging;
