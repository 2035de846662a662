//! Pipeline entry points
//!
//! - [`UpdatePipeline`]: scrape every active carrier, persist changed
//!   snapshots, diff and notify
//! - [`GeneratePipeline`]: rebuild every consolidated output from the
//!   persisted snapshots
//!
//! ## Flow
//!
//! ```text
//! CarrierSource ──► Retrier ──► canonicalize ──► SnapshotStore::commit
//!                                                     │ changed?
//!                                                     ▼
//!                                               diff ──► Notifier
//!
//! snapshots ──► load_bundle ──► Generator::produce ──► replace_if_changed
//! ```
//!
//! Both pipelines run one unit at a time (one carrier, one generator) and
//! isolate failures per unit.

pub mod generate;
pub mod update;

pub use generate::{GeneratePipeline, GenerateReport, OUTPUT_FILE_NAME};
pub use update::{UpdatePipeline, UpdateReport};
