// # Carrier Source Trait
//
// Defines the interface for fetching a carrier's published gateway ranges.
//
// ## Implementations
//
// - HTTP page scraping: `carrier-cidr-source-http` crate
//
// ## Usage
//
// ```rust,ignore
// use carrier_cidr_core::CarrierSource;
//
// let source = /* CarrierSource implementation */;
// let entries = source.scrape().await?;
// println!("{}: {} entries from {}", source.carrier(), entries.len(), source.source_url());
// ```

use crate::carrier::CarrierId;
use crate::cidr::CidrEntry;
use async_trait::async_trait;

/// Trait for per-carrier source implementations
///
/// A source performs exactly one fetch per call. Retrying is owned by the
/// update pipeline, so implementations must not loop or sleep.
///
/// An empty result is a legitimate answer to a transient failure: the
/// pipeline treats `Ok(vec![])` and `Err(_)` the same way and tries again.
#[async_trait]
pub trait CarrierSource: Send + Sync {
    /// The carrier this source publishes ranges for
    fn carrier(&self) -> CarrierId;

    /// Where the ranges are published (included in notifications)
    fn source_url(&self) -> &str;

    /// Fetch the current ranges, unsorted
    async fn scrape(&self) -> Result<Vec<CidrEntry>, crate::Error>;
}
