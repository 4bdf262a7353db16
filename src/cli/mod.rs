//! Command-line interface for `tdigest`.
//!
//! The binary digests templates stored in a directory tree, which is handy for
//! checking which cached fragments a template edit will invalidate.
//!
//! # Available Commands
//!
//! - `digest` - Print the dependency-aware digest of one or more templates
//! - `deps` - List a template's direct dependencies
//! - `tree` - Show a template's dependencies recursively
//! - `init` - Write a `tdigest.toml` with the current settings
//!
//! # Global Options
//!
//! - `--verbose` - Debug logging, including cache hits and misses
//! - `--quiet` - Errors only
//! - `--config` - Path to a configuration file
//! - `--root` - Template directory, overriding the configuration
//! - `--format` - Rendering format, overriding the configuration
//!
//! # Example
//!
//! ```bash
//! tdigest --root app/views digest topics/show
//! tdigest deps topics/show --json
//! tdigest tree topics/show
//! ```

mod common;
mod deps;
mod digest;
mod init;
mod tree;

pub use common::{CliConfig, CommandContext};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tdigest",
    about = "Dependency-aware digests for view templates",
    version,
    long_about = "tdigest computes content digests for templates that cover every template \
                  they render, directly or transitively, for use as cache-busting keys."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true, env = "TDIGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Template root directory
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Rendering format
    #[arg(short, long, global = true)]
    format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print template digests
    Digest(digest::DigestCommand),

    /// List direct dependencies of a template
    Deps(deps::DepsCommand),

    /// Show nested dependencies of a template
    Tree(tree::TreeCommand),

    /// Write a configuration file
    Init(init::InitCommand),
}

impl Cli {
    /// Run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(&config)
    }

    /// Resolve global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            root: self.root.clone(),
            format: self.format.clone(),
        }
    }

    /// Run the selected command with an already-built configuration.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        match self.command {
            Commands::Digest(cmd) => cmd.execute(config),
            Commands::Deps(cmd) => cmd.execute(config),
            Commands::Tree(cmd) => cmd.execute(config),
            Commands::Init(cmd) => cmd.execute(config),
        }
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from the flags; `None`
/// leaves logging disabled.
fn init_logging(level: Option<&str>) {
    let Some(level) = level else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
