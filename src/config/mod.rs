//! Configuration for the `tdigest` command-line host.
//!
//! The library itself takes everything as arguments; this module only describes
//! where the command-line host finds templates.
//!
//! # File Format
//!
//! ```toml
//! # Directory holding the templates (relative paths are resolved against the
//! # directory containing this file)
//! root = "app/views"
//!
//! # Format digested when --format is not given
//! format = "html"
//!
//! # Handler extensions tried after the format: show.html, then show.html.erb
//! handlers = ["erb", "haml"]
//! ```
//!
//! # Lookup Order
//!
//! 1. `--config <path>` on the command line
//! 2. The `TDIGEST_CONFIG` environment variable
//! 3. `tdigest.toml` in the current directory
//! 4. `<user config dir>/tdigest/config.toml`
//! 5. Built-in defaults
//!
//! Paths given explicitly (1 and 2) must exist; the others are skipped when absent.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_FORMAT, DEFAULT_HANDLER, DEFAULT_ROOT};
use crate::core::DigestError;
use crate::source::FileSystemSource;

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_handlers() -> Vec<String> {
    vec![DEFAULT_HANDLER.to_string()]
}

fn is_default_root(root: &Path) -> bool {
    root == Path::new(DEFAULT_ROOT)
}

fn is_default_format(format: &str) -> bool {
    format == DEFAULT_FORMAT
}

fn is_default_handlers(handlers: &[String]) -> bool {
    handlers == [DEFAULT_HANDLER]
}

/// Settings for locating and digesting templates on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Template root directory
    #[serde(default = "default_root", skip_serializing_if = "is_default_root")]
    pub root: PathBuf,

    /// Default rendering format
    #[serde(default = "default_format", skip_serializing_if = "is_default_format")]
    pub format: String,

    /// Handler extensions tried after the format, in order
    #[serde(default = "default_handlers", skip_serializing_if = "is_default_handlers")]
    pub handlers: Vec<String>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            format: default_format(),
            handlers: default_handlers(),
        }
    }
}

impl DigestConfig {
    /// Load configuration following the lookup order.
    ///
    /// Returns the configuration and the file it came from, if any.
    ///
    /// # Errors
    ///
    /// - [`DigestError::ConfigNotFound`] if an explicitly named file does not exist
    /// - [`DigestError::ConfigParse`] if a file exists but is not valid
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), DigestError> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        if let Some(path) = requested {
            let config = Self::load_from(&path)?;
            return Ok((config, Some(path)));
        }

        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE_NAME)).chain(Self::default_path());
        for path in candidates {
            if path.is_file() {
                let config = Self::load_from(&path)?;
                return Ok((config, Some(path)));
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Load configuration from a specific file.
    ///
    /// A relative `root` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// See [`DigestConfig::load`]; other read failures become [`DigestError::Io`].
    pub fn load_from(path: &Path) -> Result<Self, DigestError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DigestError::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => DigestError::Io {
                operation: "read configuration".to_string(),
                path: path.display().to_string(),
                source: e,
            },
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| DigestError::ConfigParse {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        if config.root.is_relative()
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            config.root = parent.join(&config.root);
        }

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`DigestError::Io`] if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), DigestError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| DigestError::Io {
                operation: "create configuration directory".to_string(),
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| DigestError::Other {
            message: format!("Failed to serialize configuration: {e}"),
        })?;

        std::fs::write(path, content).map_err(|e| DigestError::Io {
            operation: "write configuration".to_string(),
            path: path.display().to_string(),
            source: e,
        })
    }

    /// `<user config dir>/tdigest/config.toml`, when the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tdigest").join("config.toml"))
    }

    /// A file-system template store for this configuration.
    #[must_use]
    pub fn source(&self) -> FileSystemSource {
        FileSystemSource::new(self.root.clone(), self.handlers.clone())
    }
}
