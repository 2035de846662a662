//! Full structural YAML dump of the bundle

use super::OutputBundle;
use crate::traits::Generator;

/// Dumps the whole bundle as a YAML mapping of short name -> entry list
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlGenerator;

impl Generator for YamlGenerator {
    fn produce(&self, bundle: &OutputBundle) -> crate::Result<Vec<u8>> {
        Ok(serde_yaml_ng::to_string(bundle)?.into_bytes())
    }
}
