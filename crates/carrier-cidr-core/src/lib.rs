// # carrier-cidr-core
//
// Core library for tracking the gateway CIDR blocks published by mobile
// carriers.
//
// ## Architecture Overview
//
// - **CarrierRegistry**: Bijective carrier id <-> short name table
// - **CarrierSource**: Trait for fetching one carrier's published ranges
// - **MailTransport**: Trait for delivering change notifications
// - **Generator**: Trait for producing a consolidated output bundle
// - **UpdatePipeline**: scrape -> canonicalize -> persist -> diff -> notify
// - **GeneratePipeline**: persisted snapshots -> every registered generator
//
// ## Design Principles
//
// 1. **Library-First**: Binaries only parse flags and wire collaborators
// 2. **Atomic Persistence**: Snapshots are replaced via write-then-rename
// 3. **Change Gating**: A replace happens only when the bytes actually differ
// 4. **Isolation**: One carrier or generator failing never aborts the run

pub mod carrier;
pub mod cidr;
pub mod config;
pub mod diff;
pub mod error;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod scrape;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use carrier::{CarrierId, CarrierRegistry, DEFAULT_ACTIVE_CARRIERS};
pub use cidr::{CidrEntry, CidrSet, canonicalize};
pub use config::{GenerateConfig, Recipients, RetryConfig, UpdateConfig};
pub use diff::{DiffResult, diff};
pub use error::{Error, Result};
pub use notify::{CarrierChange, Notifier};
pub use output::{GeneratorRegistry, OutputBundle};
pub use pipeline::{GeneratePipeline, GenerateReport, UpdatePipeline, UpdateReport};
pub use scrape::Retrier;
pub use store::SnapshotStore;
pub use traits::{CarrierSource, Generator, MailMessage, MailTransport};
