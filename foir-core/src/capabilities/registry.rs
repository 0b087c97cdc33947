use std::collections::HashMap;

use thiserror::Error;

use super::traits::DocumentGenerator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown export format '{requested}'; available: {available:?}")]
    UnknownFormat {
        requested: String,
        available: Vec<&'static str>,
    },
}

/// Registry of [`DocumentGenerator`] instances, keyed by format name.
///
/// Typical lifetime:
/// 1. Create with `DocumentGeneratorRegistry::new()`.
/// 2. Call `register` once per known format.
/// 3. Call `get` whenever an export is requested.
pub struct DocumentGeneratorRegistry {
    generators: HashMap<&'static str, Box<dyn DocumentGenerator>>,
}

impl DocumentGeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Register a generator.
    ///
    /// If a generator with the same [`DocumentGenerator::format_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        generator: Box<dyn DocumentGenerator>,
    ) {
        self.generators.insert(generator.format_name(), generator);
    }

    /// Names of every registered format, sorted alphabetically.
    pub fn available_formats(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.generators.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Look up the generator for `format` (case-insensitive).
    ///
    /// # Errors
    /// * [`RegistryError::UnknownFormat`] when nothing is registered under
    ///   that name.
    pub fn get(
        &self,
        format: &str,
    ) -> Result<&dyn DocumentGenerator, RegistryError> {
        let key = format.trim().to_ascii_lowercase();
        self.generators
            .get(key.as_str())
            .map(|g| &**g)
            .ok_or_else(|| RegistryError::UnknownFormat {
                requested: format.to_string(),
                available: self.available_formats(),
            })
    }
}

impl Default for DocumentGeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
