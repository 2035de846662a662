// carrier-cidr-update
//
// Scrapes every active carrier, atomically replaces the snapshots whose
// content changed and mails a summary of each change.
//
// ```bash
// carrier-cidr-update -o /var/lib/carrier-cidr -f watch@example.jp -e ops@example.jp
// ```
//
// Exits 0 if at least one snapshot changed, 1 if none did.

use carrier_cidr::update::{UpdateArgs, UpdateExitCode};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let args = UpdateArgs::parse();

    if let Err(e) = carrier_cidr::init_tracing(Level::INFO) {
        eprintln!("{:#}", e);
        return UpdateExitCode::ConfigError.into();
    }

    args.execute().into()
}
