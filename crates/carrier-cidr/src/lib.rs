// # carrier-cidr - Command Line Tools
//
// Thin integration layer over `carrier-cidr-core`:
//
// - `carrier-cidr-update`: scrape every active carrier, persist changed
//   snapshots, mail a summary of each change
// - `carrier-cidr-generate`: render every built-in output format from the
//   persisted snapshots
//
// Binaries only parse flags, install logging and wire collaborators. All
// tracking logic lives in the core crate.

pub mod generate;
pub mod update;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global fmt subscriber, logging to stderr
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

/// Single-threaded runtime; every pipeline step is awaited in sequence
pub fn current_thread_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}
