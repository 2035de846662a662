// # Snapshot Storage
//
// Atomic replace-if-changed persistence, shared by the per-carrier
// snapshots and every generator's combined output file.

pub mod atomic;
pub mod snapshot;

pub use atomic::{file_digest, has_changed, replace_if_changed, temp_path};
pub use snapshot::{SnapshotStore, load_bundle};
