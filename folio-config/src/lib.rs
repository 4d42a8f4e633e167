//! Configuration loader for the folio pipeline.
//!
//! `defaults/folio.default.toml` is embedded into every consumer so that docs and
//! runtime behavior stay in sync. Callers layer their own files on top of those
//! defaults via [`Loader`] before deserializing into [`FolioConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Top-level configuration consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolioConfig {
    pub mangling: ManglingConfig,
    pub designators: DesignatorConfig,
    pub tags: TagConfig,
}

/// Switches for the rewrite passes running before designator resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManglingConfig {
    pub separators: bool,
    pub embedded_lists: bool,
    pub lists: bool,
    pub levels: bool,
    pub tags: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesignatorConfig {
    pub enrich: bool,
    pub resolve_collisions: bool,
}

/// Tag restriction, applied before designator resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagConfig {
    pub restrict: Vec<String>,
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

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            mangling: ManglingConfig {
                separators: true,
                embedded_lists: true,
                lists: true,
                levels: true,
                tags: true,
            },
            designators: DesignatorConfig {
                enrich: true,
                resolve_collisions: true,
            },
            tags: TagConfig {
                restrict: Vec::new(),
            },
        }
    }
}
