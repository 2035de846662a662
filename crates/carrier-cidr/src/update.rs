//! `carrier-cidr-update`: scrape, persist, notify
//!
//! ## Exit codes
//!
//! - 0: at least one carrier's snapshot was replaced
//! - 1: nothing changed (includes every carrier failing)
//! - 2: configuration or usage error
//! - 3: the runtime could not be started

use anyhow::{Context, Result};
use carrier_cidr_core::{Recipients, UpdateConfig, UpdatePipeline, UpdateReport};
use carrier_cidr_mail_sendmail::SendmailTransport;
use carrier_cidr_source_http::default_sources;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Scrape mobile carrier gateway CIDR blocks and record changes
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "carrier-cidr-update", version)]
pub struct UpdateArgs {
    /// Directory holding one snapshot file per carrier (must exist)
    #[arg(short = 'o', long = "output_dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Sender address for change notifications
    #[arg(short = 'f', long = "emailfrom", value_name = "ADDRESS")]
    pub email_from: Option<String>,

    /// Notification recipient; repeat for several
    #[arg(short = 'e', long = "email", value_name = "ADDRESS", action = ArgAction::Append)]
    pub email: Vec<String>,
}

/// Exit codes of the update tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateExitCode {
    /// At least one snapshot was replaced
    Changed = 0,
    /// No snapshot was replaced
    Unchanged = 1,
    /// Configuration or startup failure
    ConfigError = 2,
    /// The runtime could not be created
    RuntimeError = 3,
}

impl From<UpdateExitCode> for ExitCode {
    fn from(code: UpdateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&UpdateReport> for UpdateExitCode {
    fn from(report: &UpdateReport) -> Self {
        if report.any_changed() {
            UpdateExitCode::Changed
        } else {
            UpdateExitCode::Unchanged
        }
    }
}

impl UpdateArgs {
    /// One-line usage, printed alongside configuration errors
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Pipeline configuration for these flags
    pub fn to_config(&self) -> UpdateConfig {
        UpdateConfig::new(&self.output_dir)
            .with_recipients(Recipients::new(self.email_from.clone(), self.email.clone()))
    }

    /// Validate the flags and wire the HTTP sources and sendmail transport
    pub fn build_pipeline(&self) -> Result<UpdatePipeline> {
        let config = self.to_config();
        let sources =
            default_sources(&config.carriers).context("Failed to set up carrier sources")?;

        UpdatePipeline::new(config, sources, Box::new(SendmailTransport::default()))
            .context("Invalid configuration")
    }

    /// Run one update
    pub fn execute(&self) -> UpdateExitCode {
        let pipeline = match self.build_pipeline() {
            Ok(pipeline) => pipeline,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("{}", Self::usage());
                return UpdateExitCode::ConfigError;
            }
        };

        let rt = match crate::current_thread_runtime() {
            Ok(rt) => rt,
            Err(e) => {
                error!("{:#}", e);
                return UpdateExitCode::RuntimeError;
            }
        };

        let report = rt.block_on(pipeline.run());
        UpdateExitCode::from(&report)
    }
}
