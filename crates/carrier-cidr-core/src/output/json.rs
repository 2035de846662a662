//! Pretty JSON dump of the bundle

use super::OutputBundle;
use crate::traits::Generator;

/// Dumps the bundle as a pretty-printed JSON object with a trailing newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGenerator;

impl Generator for JsonGenerator {
    fn produce(&self, bundle: &OutputBundle) -> crate::Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(bundle)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
