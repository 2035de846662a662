//! Output bundle and generator registry
//!
//! The registry maps generator names to [`Generator`] implementations, so the
//! generate pipeline iterates the map instead of branching on names.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carrier_cidr_core::output::GeneratorRegistry;
//!
//! let mut registry = GeneratorRegistry::with_builtins();
//! registry.register("csv", Box::new(MyCsvGenerator));
//!
//! for (name, generator) in registry.iter() {
//!     let bytes = generator.produce(&bundle)?;
//! }
//! ```

pub mod json;
pub mod pair;
pub mod yaml;

pub use json::JsonGenerator;
pub use pair::PairGenerator;
pub use yaml::YamlGenerator;

use crate::cidr::CidrSet;
use crate::traits::Generator;
use serde::Serialize;
use std::collections::BTreeMap;

/// Carrier short name -> current canonical set, read fresh from snapshots
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputBundle {
    carriers: BTreeMap<String, CidrSet>,
}

impl OutputBundle {
    /// Create a bundle from a complete carrier map
    pub fn new(carriers: BTreeMap<String, CidrSet>) -> Self {
        Self { carriers }
    }

    /// Set for one carrier
    pub fn get(&self, short_name: &str) -> Option<&CidrSet> {
        self.carriers.get(short_name)
    }

    /// Carrier short names in order
    pub fn carrier_names(&self) -> impl Iterator<Item = &str> {
        self.carriers.keys().map(String::as_str)
    }

    /// `(short_name, set)` pairs in short-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CidrSet)> {
        self.carriers.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Number of carriers present
    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    /// Whether no carrier snapshot was found
    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

impl FromIterator<(String, CidrSet)> for OutputBundle {
    fn from_iter<I: IntoIterator<Item = (String, CidrSet)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Registry of output generators, keyed by name
///
/// The name is also the output subdirectory: `<output_root>/<name>/cidr`.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `yaml`, `pair` and `json` generators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("yaml", Box::new(YamlGenerator));
        registry.register("pair", Box::new(PairGenerator));
        registry.register("json", Box::new(JsonGenerator));
        registry
    }

    /// Register a generator, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, generator: Box<dyn Generator>) {
        let name = name.into();
        if self.generators.insert(name.clone(), generator).is_some() {
            tracing::debug!("Replaced generator {}", name);
        }
    }

    /// Check if a generator is registered
    pub fn has_generator(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered generator names
    pub fn list_generators(&self) -> Vec<String> {
        self.generators.keys().cloned().collect()
    }

    /// `(name, generator)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Generator)> {
        self.generators
            .iter()
            .map(|(name, generator)| (name.as_str(), generator.as_ref()))
    }
}
