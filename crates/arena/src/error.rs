//! # Arena Error Types
//!
//! Generation and queries never fail. These errors only come from the
//! configuration boundary: reading, parsing and validating config files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading arena configuration.
#[derive(Error, Debug)]
pub enum ArenaError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `ArenaConfig`.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but a value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for arena configuration operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
