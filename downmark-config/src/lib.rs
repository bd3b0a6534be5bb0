//! Shared configuration loader for the downmark toolchain.
//!
//! `defaults/downmark.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`DownmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use downmark::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/downmark.default.toml");

/// Top-level configuration consumed by downmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DownmarkConfig {
    pub format: FormatConfig,
    pub style: StyleConfig,
    pub convert: ConvertConfig,
}

/// Mirrors the knobs exposed by the line formatter.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    pub max_line_length: usize,
    pub paragraph_layout: bool,
    pub sentence_mode: bool,
}

/// Style-analysis knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    pub reference_page_width_mm: f64,
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub dialect: String,
}

impl From<&DownmarkConfig> for ConvertOptions {
    fn from(config: &DownmarkConfig) -> Self {
        ConvertOptions {
            max_line_length: config.format.max_line_length,
            paragraph_layout: config.format.paragraph_layout,
            sentence_mode: config.format.sentence_mode,
            reference_page_width_mm: config.style.reference_page_width_mm,
        }
    }
}

impl From<DownmarkConfig> for ConvertOptions {
    fn from(config: DownmarkConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DownmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DownmarkConfig, ConfigError> {
    Loader::new().build()
}
