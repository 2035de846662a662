// carrier-cidr-generate
//
// Renders every built-in output format from the persisted snapshots into
// `<output_dir>/<format>/cidr`.
//
// ```bash
// carrier-cidr-generate -i /var/lib/carrier-cidr -o /srv/www/cidr -d
// ```

use carrier_cidr::generate::{GenerateArgs, GenerateExitCode};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = GenerateArgs::parse();

    if let Err(e) = carrier_cidr::init_tracing(args.log_level()) {
        eprintln!("{:#}", e);
        return GenerateExitCode::ConfigError.into();
    }

    args.execute().into()
}
