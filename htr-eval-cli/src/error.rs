//! User-facing failures of the htr command

use std::fmt;
use std::path::PathBuf;

/// Conditions reported to the user as-is, without a backtrace of causes
#[derive(Debug)]
pub enum CliError {
    /// Transcript, transcription, manifest or report missing on disk
    FileNotFound(PathBuf),
    /// Glob pattern that cannot be parsed
    InvalidPattern(String),
    /// Bad value in the config file or on the command line
    ConfigError(String),
    /// Manifest without any `[[rows]]`
    EmptyManifest(PathBuf),
    /// Every selected row failed, or none were selected
    NoRowsEvaluated,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::EmptyManifest(path) => write!(f, "Manifest is empty: {}", path.display()),
            Self::NoRowsEvaluated => f.write_str("No rows were successfully evaluated"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
