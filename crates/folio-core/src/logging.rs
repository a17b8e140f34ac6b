#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! This module re-exports the `debug` and `trace` macros when the `tracing`
//! feature is enabled. When the feature is disabled, no-op macros with the same
//! names are provided so that the layout and widget crates can log
//! unconditionally. Spans are gated on the feature at the call site.
//!
//! With `tracing-json`, [`init_json_logging`] installs a JSON `fmt` subscriber
//! filtered by an `EnvFilter` directive (e.g. `"folio=debug"`).

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Failure to install the global JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError(String);

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install JSON subscriber: {}", self.0)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a global JSON subscriber using `directives` as the env filter.
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(directives: &str) -> Result<(), LoggingInitError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directives))
        .try_init()
        .map_err(|err| LoggingInitError(err.to_string()))
}
