//! Logging bootstrap shared by the Mealgate binaries and test harnesses.
//!
//! Output format follows `LOG_FORMAT` ("json" for log aggregation, anything
//! else is human-readable text) and filtering follows `RUST_LOG`, defaulting
//! to `info` for the whole process.

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber. Call once, early in main.
pub fn init_logging(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json_output_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    info!(service = service_name, "Logging initialized");
}

fn json_output_requested(format: Option<&str>) -> bool {
    format.is_some_and(|value| value.eq_ignore_ascii_case("json"))
}
