//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Configure log level from config, overridable via RUST_LOG
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Pretty format in debug mode, compact format otherwise
//! - Debug mode forces debug-level filtering for this crate

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// The configured level applies to this crate and tower_http; `RUST_LOG`
/// takes precedence when set.
pub fn init_logging(config: &ObservabilityConfig) {
    let level = if config.debug {
        "debug"
    } else {
        config.log_level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("http_echo={level},tower_http={level}")));

    let registry = tracing_subscriber::registry().with(filter);

    if config.debug {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
