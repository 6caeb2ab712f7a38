//! # Errors
//!
//! Error types for the fallible edges of the sandbox. The simulation itself never
//! fails; only loading and checking configuration can.

use std::path::PathBuf;

/// Errors raised while loading or validating a `SimulationConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for `SimulationConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed fine but is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
