//! Observability for LojaTech.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - Serializable logging knobs for config files
//! - `LoggingConfig` - The `[logging]` config section
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
