//! Generate pipeline
//!
//! Loads every persisted carrier snapshot into an [`OutputBundle`] and hands
//! it to each registered generator in turn. Each generator's bytes go
//! through the same atomic replace-if-changed protocol as the snapshots,
//! into `<output_dir>/<generator name>/cidr`.

use crate::carrier::CarrierRegistry;
use crate::config::GenerateConfig;
use crate::error::{Error, Result};
use crate::output::{GeneratorRegistry, OutputBundle};
use crate::store::{load_bundle, replace_if_changed};
use crate::traits::Generator;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error, info};

/// File name each generator writes inside its own directory
pub const OUTPUT_FILE_NAME: &str = "cidr";

/// Outcome of one generate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Carriers found in the input directory
    pub carriers: Vec<String>,
    /// Generators whose output file was replaced
    pub changed: Vec<String>,
    /// Generators whose output already matched
    pub unchanged: Vec<String>,
    /// Generators skipped by an error, with the reason
    pub failed: BTreeMap<String, String>,
}

/// Snapshots -> bundle -> every generator
pub struct GeneratePipeline {
    input_dir: PathBuf,
    output_dir: PathBuf,
    registry: CarrierRegistry,
    generators: GeneratorRegistry,
}

impl GeneratePipeline {
    /// Create a new generate pipeline
    pub fn new(config: GenerateConfig, generators: GeneratorRegistry) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            input_dir: config.input_dir,
            output_dir: config.output_dir,
            registry: CarrierRegistry::new(),
            generators,
        })
    }

    /// Output file path for a generator
    pub fn output_path(&self, generator_name: &str) -> PathBuf {
        self.output_dir.join(generator_name).join(OUTPUT_FILE_NAME)
    }

    /// Run every registered generator once
    ///
    /// Fails only if the input directory itself cannot be listed; generator
    /// failures are recorded in the report.
    pub async fn run(&self) -> Result<GenerateReport> {
        let bundle = load_bundle(&self.input_dir, &self.registry).await?;

        let mut report = GenerateReport {
            carriers: bundle.carrier_names().map(str::to_owned).collect(),
            ..GenerateReport::default()
        };

        info!(
            "Generating outputs for {} carrier(s) with {} generator(s)",
            bundle.len(),
            self.generators.list_generators().len()
        );

        for (name, generator) in self.generators.iter() {
            match self.run_generator(name, generator, &bundle).await {
                Ok(true) => {
                    info!("{} output updated", name);
                    report.changed.push(name.to_string());
                }
                Ok(false) => {
                    debug!("{} output unchanged", name);
                    report.unchanged.push(name.to_string());
                }
                Err(e) => {
                    error!("Generator {} failed: {}", name, e);
                    report.failed.insert(name.to_string(), e.to_string());
                }
            }
        }

        Ok(report)
    }

    async fn run_generator(
        &self,
        name: &str,
        generator: &dyn Generator,
        bundle: &OutputBundle,
    ) -> Result<bool> {
        let bytes = generator.produce(bundle)?;

        let target = self.output_path(name);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).await.map_err(|e| Error::io(dir, e))?;
        }

        replace_if_changed(&target, &bytes).await
    }
}
