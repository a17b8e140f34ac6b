#![forbid(unsafe_code)]

//! Core: geometry and logging shared by the Folio layout, widget and runtime crates.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};

#[cfg(feature = "tracing-json")]
pub use logging::{LoggingInitError, init_json_logging};
