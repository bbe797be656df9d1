//! Configuration loading
//!
//! `defaults/footnotes.default.toml` is embedded into the binary so that
//! docs and runtime behavior stay in sync. Callers layer user files and
//! CLI overrides on top of those defaults via [`Loader`] before
//! deserializing into [`FileOptions`], which then converts into runtime
//! [`Options`].

use crate::error::FootnoteError;
use crate::options::Options;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/footnotes.default.toml");

/// The file-configurable subset of the option surface. The extraction
/// strategy is code-only and keeps its default here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileOptions {
    pub markers: String,
    pub prepend: String,
    pub single_destination: bool,
    pub destination_id: String,
    pub content_anchor: String,
    pub marker_class: String,
    pub ordered_list: bool,
    pub debug: bool,
}

impl FileOptions {
    /// Convert into runtime options, parsing the selector strings.
    pub fn into_options(self) -> Result<Options, FootnoteError> {
        let mut opts = Options {
            single_destination: self.single_destination,
            destination_id: self.destination_id,
            marker_class: self.marker_class,
            ordered_list: self.ordered_list,
            debug: self.debug,
            ..Options::default()
        };
        opts.set_markers(&self.markers)?;
        opts.set_prepend(&self.prepend)?;
        opts.set_content_anchor(&self.content_anchor)?;
        Ok(opts)
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, FootnoteError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| FootnoteError::ConfigError(e.to_string()))?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FileOptions, FootnoteError> {
        self.builder
            .build()
            .and_then(|config| config.try_deserialize::<FileOptions>())
            .map_err(|e| FootnoteError::ConfigError(e.to_string()))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
