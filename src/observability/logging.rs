//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable by `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Compact format for production, pretty format for development
//! - A second initialization returns an error instead of panicking

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ObservabilityConfig};

/// Default filter directive for a configured level.
pub fn default_directive(level: &str) -> String {
    format!("admin_shell={}", level.to_lowercase())
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig, environment: Environment) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));
    let production = environment.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with((!production).then(|| fmt::layer().pretty()))
        .with(production.then(|| fmt::layer().compact().with_ansi(false)))
        .try_init()
}
