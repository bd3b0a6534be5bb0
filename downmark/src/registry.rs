//! Dialect registry for dialect discovery and selection
//!
//! This module provides a centralized registry for all available target
//! dialects. Dialects can be registered and retrieved by name.

use std::collections::HashMap;

use crate::dialect::Dialect;
use crate::dialects::{AsciidocDialect, TextileDialect};
use crate::error::ConvertError;

/// Registry of target dialects
///
/// Provides a centralized registry for all available dialects.
/// Dialects can be registered and retrieved by name.
///
/// # Examples
///
/// ```ignore
/// let registry = DialectRegistry::with_defaults();
/// let dialect = registry.get("asciidoc")?;
/// let output = Pipeline::new(dialect).run_to_string(source, &mut report)?;
/// ```
pub struct DialectRegistry {
    dialects: HashMap<String, Box<dyn Dialect>>,
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        DialectRegistry {
            dialects: HashMap::new(),
        }
    }

    /// Create a registry with the built-in dialects registered
    pub fn with_defaults() -> Self {
        let mut registry = DialectRegistry::new();
        registry.register(AsciidocDialect::default());
        registry.register(TextileDialect::default());
        registry
    }

    /// Register a dialect
    ///
    /// If a dialect with the same name already exists, it will be replaced.
    pub fn register<D: Dialect + 'static>(&mut self, dialect: D) {
        self.dialects
            .insert(dialect.name().to_string(), Box::new(dialect));
    }

    /// Get a dialect by name
    pub fn get(&self, name: &str) -> Result<&dyn Dialect, ConvertError> {
        self.dialects
            .get(name)
            .map(|d| d.as_ref())
            .ok_or_else(|| ConvertError::DialectNotFound(name.to_string()))
    }

    /// Check if a dialect exists
    pub fn has(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// List all available dialect names (sorted)
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<_> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect dialect from filename based on file extension
    ///
    /// Returns the dialect name if a matching extension is found, or None
    /// otherwise.
    pub fn detect_dialect_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        for dialect in self.dialects.values() {
            if dialect.file_extensions().contains(&extension) {
                return Some(dialect.name().to_string());
            }
        }

        None
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        DialectRegistry::with_defaults()
    }
}
