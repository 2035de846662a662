//! `carrier-cidr-generate`: render outputs from persisted snapshots
//!
//! ## Exit codes
//!
//! - 0: every generator ran (individual generator failures are logged)
//! - 1: the input directory could not be listed, or the runtime failed
//! - 2: configuration or usage error

use anyhow::{Context, Result};
use carrier_cidr_core::{GenerateConfig, GeneratePipeline, GeneratorRegistry};
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error};

/// Generate consolidated carrier CIDR listings
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "carrier-cidr-generate", version)]
pub struct GenerateArgs {
    /// Directory holding the per-carrier snapshots (must exist)
    #[arg(short = 'i', long = "input_dir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory under which each format writes `<name>/cidr` (must exist)
    #[arg(short = 'o', long = "output_dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Raise log verbosity; repeat for more
    #[arg(short = 'd', long = "debug", action = ArgAction::Count)]
    pub debug: u8,
}

/// Exit codes of the generate tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateExitCode {
    /// Generation ran to completion
    Completed = 0,
    /// Snapshots could not be loaded or the runtime failed
    RuntimeError = 1,
    /// Configuration or startup failure
    ConfigError = 2,
}

impl From<GenerateExitCode> for ExitCode {
    fn from(code: GenerateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl GenerateArgs {
    /// Log level selected by the number of `-d` flags
    pub fn log_level(&self) -> Level {
        match self.debug {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// One-line usage, printed alongside configuration errors
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Pipeline configuration for these flags
    pub fn to_config(&self) -> GenerateConfig {
        GenerateConfig::new(&self.input_dir, &self.output_dir)
    }

    /// Validate the flags and register the built-in formats
    pub fn build_pipeline(&self) -> Result<GeneratePipeline> {
        GeneratePipeline::new(self.to_config(), GeneratorRegistry::with_builtins())
            .context("Invalid configuration")
    }

    /// Run every generator once
    pub fn execute(&self) -> GenerateExitCode {
        let pipeline = match self.build_pipeline() {
            Ok(pipeline) => pipeline,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("{}", Self::usage());
                return GenerateExitCode::ConfigError;
            }
        };

        let rt = match crate::current_thread_runtime() {
            Ok(rt) => rt,
            Err(e) => {
                error!("{:#}", e);
                return GenerateExitCode::RuntimeError;
            }
        };

        match rt.block_on(pipeline.run()) {
            Ok(_) => GenerateExitCode::Completed,
            Err(e) => {
                error!("Generation failed: {}", e);
                GenerateExitCode::RuntimeError
            }
        }
    }
}
