//! Shared configuration loader for glint.
//!
//! `defaults/glint.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`GlintConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use glint_engine::{Encoding, Settings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/glint.default.toml");

/// Top-level configuration consumed by glint applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GlintConfig {
    pub metrics: MetricsConfig,
    pub sources: SourcesConfig,
    pub batch: BatchConfig,
    pub surefire: SurefireConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub ignore_header_comments: bool,
}

/// Which files are analyzed and how they are read.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub suffixes: Vec<String>,
    pub encoding: String,
    pub test_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub workers: usize,
    pub deadline_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurefireConfig {
    pub reports_path: String,
}

impl GlintConfig {
    /// Engine settings derived from the `metrics` group.
    pub fn engine_settings(&self) -> Settings {
        Settings {
            ignore_header_comments: self.metrics.ignore_header_comments,
        }
    }

    /// Declared source encoding. Unknown labels fall back to UTF-8.
    pub fn encoding(&self) -> Encoding {
        Encoding::from_label(&self.sources.encoding).unwrap_or_else(|| {
            warn!(label = %self.sources.encoding, "unknown source encoding, using utf-8");
            Encoding::Utf8
        })
    }

    pub fn workers(&self) -> Option<usize> {
        (self.batch.workers > 0).then_some(self.batch.workers)
    }

    pub fn deadline(&self) -> Option<Duration> {
        (self.batch.deadline_secs > 0).then(|| Duration::from_secs(self.batch.deadline_secs))
    }

    pub fn reports_path(&self) -> Option<PathBuf> {
        let path = self.surefire.reports_path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
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

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<GlintConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GlintConfig, ConfigError> {
    Loader::new().build()
}
