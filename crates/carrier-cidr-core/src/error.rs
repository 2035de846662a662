//! Error types for the carrier CIDR tracker
//!
//! This module defines all error types used throughout the crate.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for carrier CIDR operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the carrier CIDR tracker
#[derive(Error, Debug)]
pub enum Error {
    /// A carrier's source stayed empty across every retry attempt
    #[error("Source unavailable for {carrier}: no entries after {attempts} attempt(s)")]
    SourceUnavailable {
        /// Carrier short name
        carrier: String,
        /// Number of attempts made
        attempts: usize,
    },

    /// File I/O failed for a single target
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery errors
    #[error("Mail transport error: {0}")]
    Transport(String),

    /// Carrier id or short name outside the fixed registry
    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),

    /// Output generator failed to produce its bundle
    #[error("Generator error ({name}): {message}")]
    Generator {
        /// Generator name
        name: String,
        /// Error message
        message: String,
    },

    /// HTTP errors (from carrier sources)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl Error {
    /// Create an I/O error bound to the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a source-unavailable error
    pub fn source_unavailable(carrier: impl Into<String>, attempts: usize) -> Self {
        Self::SourceUnavailable {
            carrier: carrier.into(),
            attempts,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unknown-carrier error
    pub fn unknown_carrier(name: impl Into<String>) -> Self {
        Self::UnknownCarrier(name.into())
    }

    /// Create a generator error
    pub fn generator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generator {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
