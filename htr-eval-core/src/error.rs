//! Error types for the fallible edges around the evaluation engine
//!
//! The metric computations themselves never fail. Errors only arise when
//! building configuration, loading or storing reports, or setting up a
//! worker pool for batch evaluation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the pure metric computations
#[derive(Error, Debug)]
pub enum EvalError {
    /// Invalid evaluation configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error with the path that caused it
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        /// The file that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Report could not be encoded or decoded as JSON
    #[error("failed to parse JSON from '{}': {source}", .path.display())]
    Json {
        /// The report file involved
        path: PathBuf,
        /// Underlying serde_json error
        source: serde_json::Error,
    },

    /// Report could not be encoded or decoded as YAML
    #[error("failed to parse YAML from '{}': {source}", .path.display())]
    Yaml {
        /// The report file involved
        path: PathBuf,
        /// Underlying serde_yaml error
        source: serde_yaml::Error,
    },

    /// Configuration file is not valid TOML
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Worker pool for parallel batches could not be created
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),
}

/// Result type for fallible operations in this crate
pub type Result<T> = std::result::Result<T, EvalError>;
