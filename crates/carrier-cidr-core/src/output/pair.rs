//! Flattened `<cidr> <carrier>` listing

use super::OutputBundle;
use crate::traits::Generator;
use std::fmt::Write as _;

/// Width of the left-aligned CIDR column (fits `255.255.255.255/32`)
const CIDR_COLUMN_WIDTH: usize = 18;

/// One line per entry: fixed-width CIDR column, a space, the carrier
///
/// Carriers appear in short-name order, entries in snapshot order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairGenerator;

impl Generator for PairGenerator {
    fn produce(&self, bundle: &OutputBundle) -> crate::Result<Vec<u8>> {
        let mut out = String::new();
        for (carrier, set) in bundle.iter() {
            for entry in set {
                // Writing to a String cannot fail
                let _ = writeln!(
                    out,
                    "{:<width$} {}",
                    entry.as_str(),
                    carrier,
                    width = CIDR_COLUMN_WIDTH
                );
            }
        }
        Ok(out.into_bytes())
    }
}
