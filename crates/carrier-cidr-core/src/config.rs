//! Configuration types for the carrier CIDR tracker
//!
//! This module defines the configuration for both pipelines. Nothing here is
//! process-global: each pipeline owns the config it was built with.

use crate::carrier::{CarrierId, DEFAULT_ACTIVE_CARRIERS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Update pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Directory holding one snapshot file per carrier
    pub output_dir: PathBuf,

    /// Carriers to scrape, in processing order
    #[serde(default = "default_carriers")]
    pub carriers: Vec<CarrierId>,

    /// Scrape retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Change notification recipients
    #[serde(default)]
    pub recipients: Recipients,
}

impl UpdateConfig {
    /// Create a configuration with default carriers, retries and no recipients
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            carriers: default_carriers(),
            retry: RetryConfig::default(),
            recipients: Recipients::default(),
        }
    }

    /// Set the notification recipients
    pub fn with_recipients(mut self, recipients: Recipients) -> Self {
        self.recipients = recipients;
        self
    }

    /// Set the carriers to scrape
    pub fn with_carriers(mut self, carriers: Vec<CarrierId>) -> Self {
        self.carriers = carriers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        require_dir("output directory", &self.output_dir)?;
        self.retry.validate()?;

        if self.carriers.is_empty() {
            return Err(crate::Error::config("No carriers configured"));
        }

        for (i, carrier) in self.carriers.iter().enumerate() {
            if self.carriers[..i].contains(carrier) {
                return Err(crate::Error::config(format!(
                    "Carrier {} listed more than once",
                    carrier
                )));
            }
        }

        self.recipients.validate()
    }
}

/// Generator pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Directory holding the per-carrier snapshot files
    pub input_dir: PathBuf,

    /// Root under which each generator writes `<name>/cidr`
    pub output_dir: PathBuf,
}

impl GenerateConfig {
    /// Create a new generator configuration
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        require_dir("input directory", &self.input_dir)?;
        require_dir("output directory", &self.output_dir)
    }
}

/// Scrape retry settings
///
/// Attempts run back to back; there is no delay or backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total scrape attempts per carrier (including the first)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl RetryConfig {
    /// Validate the retry settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_attempts == 0 {
            return Err(crate::Error::config("Retry max_attempts must be >= 1"));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// Notification addressing
///
/// An empty `to` list disables notification entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipients {
    /// Envelope and header sender
    #[serde(default)]
    pub from: Option<String>,

    /// Recipient addresses
    #[serde(default)]
    pub to: Vec<String>,
}

impl Recipients {
    /// Create a recipient list
    pub fn new(from: Option<String>, to: Vec<String>) -> Self {
        Self { from, to }
    }

    /// Whether any notification should be sent
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
    }

    /// Validate the addresses
    pub fn validate(&self) -> Result<(), crate::Error> {
        for address in self.from.iter().chain(self.to.iter()) {
            if address.trim().is_empty() {
                return Err(crate::Error::config("Email address cannot be empty"));
            }
            if !address.contains('@') {
                return Err(crate::Error::config(format!(
                    "Email address '{}' is missing '@'",
                    address
                )));
            }
        }
        Ok(())
    }
}

fn require_dir(label: &str, path: &Path) -> Result<(), crate::Error> {
    if path.as_os_str().is_empty() {
        return Err(crate::Error::config(format!("{} is required", label)));
    }
    if !path.is_dir() {
        return Err(crate::Error::config(format!(
            "{} {} does not exist or is not a directory",
            label,
            path.display()
        )));
    }
    Ok(())
}

fn default_carriers() -> Vec<CarrierId> {
    DEFAULT_ACTIVE_CARRIERS.to_vec()
}

fn default_max_attempts() -> usize {
    4
}
