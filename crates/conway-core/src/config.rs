//! Configuration loading and typed config structures for the board service.
//!
//! The configuration lives in `conway-config.yaml` next to the binary's
//! working directory. This module defines strongly-typed structs that
//! mirror the YAML structure, and a loader that reads the file. Every
//! field has a default, so an empty or absent file is a valid
//! configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Upload validation limits.
    #[serde(default)]
    pub board: BoardSection,

    /// Board persistence settings.
    #[serde(default)]
    pub storage: StorageSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `CONWAY_PORT` overrides `server.port`
    /// - `CONWAY_SNAPSHOT_PATH` overrides `storage.snapshot_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unparseable values are ignored and the YAML value is kept.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("CONWAY_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = lookup("CONWAY_SNAPSHOT_PATH") {
            self.storage.snapshot_path = PathBuf::from(path);
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upload validation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoardSection {
    /// Minimum rows an uploaded board must have.
    #[serde(default = "default_min_dimension")]
    pub min_rows: usize,

    /// Minimum columns an uploaded board must have.
    #[serde(default = "default_min_dimension")]
    pub min_cols: usize,
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            min_rows: default_min_dimension(),
            min_cols: default_min_dimension(),
        }
    }
}

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// In-process map only; boards are lost on restart.
    Memory,
    /// In-process map mirrored to a JSON snapshot file.
    #[default]
    File,
}

/// Board persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSection {
    /// Store implementation.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Snapshot file used by the `file` backend.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Write the snapshot after every upload and simulation step, not
    /// only at shutdown.
    #[serde(default)]
    pub write_through: bool,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            snapshot_path: default_snapshot_path(),
            write_through: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive (trace, debug, info, warn, error) when
    /// `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_min_dimension() -> usize {
    3
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("boards.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}
