//! Update pipeline
//!
//! For each active carrier, in configured order:
//!
//! 1. Scrape with bounded retries
//! 2. Canonicalize
//! 3. Read the previously committed snapshot (absent = empty)
//! 4. Atomically replace the snapshot if its bytes changed
//! 5. If replaced: diff old -> new and notify
//!
//! A carrier that fails at any step is recorded and skipped; the previous
//! snapshot stays authoritative and the remaining carriers still run.

use crate::carrier::{CarrierId, CarrierRegistry};
use crate::cidr::{CidrSet, canonicalize};
use crate::config::UpdateConfig;
use crate::diff::diff;
use crate::error::{Error, Result};
use crate::notify::{CarrierChange, Notifier};
use crate::scrape::Retrier;
use crate::store::SnapshotStore;
use crate::traits::{CarrierSource, MailTransport};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

/// Outcome of one update run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Raw (unsorted) sets for every carrier that produced entries
    pub scraped: BTreeMap<String, CidrSet>,
    /// Carriers whose snapshot was replaced
    pub changed: Vec<String>,
    /// Carriers whose snapshot already matched
    pub unchanged: Vec<String>,
    /// Carriers skipped by an error, with the reason
    pub failed: BTreeMap<String, String>,
    /// Carriers whose snapshot was replaced but whose notification failed
    pub notify_failed: BTreeMap<String, String>,
}

impl UpdateReport {
    /// Whether at least one snapshot was replaced
    pub fn any_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

enum CarrierOutcome {
    Changed,
    Unchanged,
}

/// Scrape -> persist -> diff -> notify, per carrier
///
/// All state a run needs lives here; nothing is process-global.
pub struct UpdatePipeline {
    carriers: Vec<CarrierId>,
    registry: CarrierRegistry,
    sources: BTreeMap<CarrierId, Box<dyn CarrierSource>>,
    retrier: Retrier,
    store: SnapshotStore,
    notifier: Notifier,
}

impl UpdatePipeline {
    /// Create a new update pipeline
    ///
    /// # Parameters
    ///
    /// - `config`: validated before anything else happens
    /// - `sources`: one source per carrier; extra sources are ignored
    /// - `transport`: used only when `config.recipients` is nonempty
    pub fn new(
        config: UpdateConfig,
        sources: Vec<Box<dyn CarrierSource>>,
        transport: Box<dyn MailTransport>,
    ) -> Result<Self> {
        config.validate()?;

        let mut by_carrier = BTreeMap::new();
        for source in sources {
            let carrier = source.carrier();
            if by_carrier.insert(carrier, source).is_some() {
                return Err(Error::config(format!(
                    "More than one source registered for {}",
                    carrier
                )));
            }
        }

        Ok(Self {
            carriers: config.carriers,
            registry: CarrierRegistry::new(),
            sources: by_carrier,
            retrier: Retrier::new(&config.retry),
            store: SnapshotStore::new(config.output_dir),
            notifier: Notifier::new(transport, config.recipients),
        })
    }

    /// Run every active carrier once
    pub async fn run(&self) -> UpdateReport {
        let mut report = UpdateReport::default();

        info!("Updating {} carrier(s)", self.carriers.len());

        for &carrier in &self.carriers {
            let short_name = match self.registry.short_name_of(carrier) {
                Ok(name) => name,
                Err(e) => {
                    error!("{}", e);
                    report.failed.insert(carrier.to_string(), e.to_string());
                    continue;
                }
            };

            match self.process_carrier(carrier, short_name, &mut report).await {
                Ok(CarrierOutcome::Changed) => report.changed.push(short_name.to_string()),
                Ok(CarrierOutcome::Unchanged) => report.unchanged.push(short_name.to_string()),
                Err(e) => {
                    match &e {
                        Error::SourceUnavailable { .. } => warn!("Skipping {}: {}", short_name, e),
                        _ => error!("Failed to update {}: {}", short_name, e),
                    }
                    report.failed.insert(short_name.to_string(), e.to_string());
                }
            }
        }

        info!(
            "Update finished: {} changed, {} unchanged, {} failed",
            report.changed.len(),
            report.unchanged.len(),
            report.failed.len()
        );

        report
    }

    async fn process_carrier(
        &self,
        carrier: CarrierId,
        short_name: &str,
        report: &mut UpdateReport,
    ) -> Result<CarrierOutcome> {
        let source = self
            .sources
            .get(&carrier)
            .ok_or_else(|| Error::config(format!("No source registered for {}", carrier)))?;

        let raw = self.retrier.scrape(source.as_ref(), short_name).await?;
        report.scraped.insert(short_name.to_string(), raw.clone());

        let new = canonicalize(raw);
        let old = self.store.read(short_name).await?.unwrap_or_default();

        if !self.store.commit(short_name, &new).await? {
            debug!("{} unchanged ({} entries)", short_name, new.len());
            return Ok(CarrierOutcome::Unchanged);
        }

        let changes = diff(&old, &new);
        info!(
            "{} updated: {} entries (+{} -{})",
            short_name,
            new.len(),
            changes.added.len(),
            changes.deleted.len()
        );

        let change = CarrierChange {
            carrier: short_name,
            source_url: source.source_url(),
            old: &old,
            new: &new,
            diff: &changes,
        };

        // The snapshot is already committed; a failed notification is
        // reported but never undoes it.
        if let Err(e) = self.notifier.notify(&change).await {
            warn!("Notification for {} failed: {}", short_name, e);
            report
                .notify_failed
                .insert(short_name.to_string(), e.to_string());
        }

        Ok(CarrierOutcome::Changed)
    }
}
