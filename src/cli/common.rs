//! Shared setup for CLI commands.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DigestConfig;
use crate::digest::{Digestor, TracingLogger};
use crate::source::FileSystemSource;

/// Global options after configuration has been resolved.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, `None` disables logging
    pub log_level: Option<String>,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
    /// Template root overriding the configuration
    pub root: Option<PathBuf>,
    /// Format overriding the configuration
    pub format: Option<String>,
}

/// Everything a command needs to look templates up and digest them.
#[derive(Debug)]
pub struct CommandContext {
    /// Effective configuration, overrides applied
    pub config: DigestConfig,
    /// Template store rooted at the configured directory
    pub source: FileSystemSource,
    /// Digestor reporting through `tracing`
    pub digestor: Digestor,
}

impl CommandContext {
    /// Load configuration and apply command-line overrides.
    pub fn new(cli: &CliConfig) -> Result<Self> {
        let (mut config, loaded_from) = DigestConfig::load(cli.config_path.as_deref())
            .context("Failed to load tdigest configuration")?;
        if let Some(path) = loaded_from {
            tracing::debug!("Using configuration from {}", path.display());
        }

        if let Some(root) = &cli.root {
            config.root = root.clone();
        }
        if let Some(format) = &cli.format {
            config.format = format.clone();
        }

        if !config.root.is_dir() {
            anyhow::bail!(
                "Template root {} does not exist or is not a directory",
                config.root.display()
            );
        }

        let source = config.source();
        let digestor = Digestor::new().with_logger(Arc::new(TracingLogger));
        Ok(Self {
            config,
            source,
            digestor,
        })
    }

    /// The format commands operate in.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.config.format
    }
}
