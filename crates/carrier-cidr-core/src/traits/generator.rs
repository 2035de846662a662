//! Output generator trait
//!
//! A generator turns the current [`OutputBundle`] into the bytes of one
//! combined file. Generators are pure: persisting the bytes is the job of
//! the generate pipeline.

use crate::output::OutputBundle;

/// Trait for consolidated output generators
pub trait Generator: Send + Sync {
    /// Render the bundle
    fn produce(&self, bundle: &OutputBundle) -> Result<Vec<u8>, crate::Error>;
}
