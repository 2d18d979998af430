//! Logging setup for atscore.
//!
//! Utilities for configuring logging through the `tracing` crate.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log levels supported by atscore.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error logs only
    Error,
    /// Warning and error logs
    Warn,
    /// Info, warning, and error logs
    Info,
    /// Debug, info, warning, and error logs
    Debug,
    /// Everything, including per-request trace detail
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Initialize logging with a specific log level.
///
/// Typically called once at the start of the application. The `ATSCORE_LOG`
/// environment variable takes precedence over the level passed here:
///
/// ```bash
/// ATSCORE_LOG=debug atscore --resume resume.pdf --jd jd.txt
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_env("ATSCORE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("atscore={}", level.to_tracing_level())));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::debug!("atscore logging initialized at level: {:?}", level);
}
