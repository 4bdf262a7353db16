//! Write a `tdigest.toml` configuration file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use crate::config::DigestConfig;
use crate::constants::CONFIG_FILE_NAME;

#[derive(Args, Debug)]
pub struct InitCommand {
    /// Where to write the file (defaults to ./tdigest.toml)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    pub fn execute(self, cli: &CliConfig) -> Result<()> {
        let path = self.path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        if path.exists() && !self.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }

        let mut config = DigestConfig::default();
        if let Some(root) = &cli.root {
            config.root = root.clone();
        }
        if let Some(format) = &cli.format {
            config.format = format.clone();
        }

        config
            .save_to(&path)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        println!("{} {}", "Created".green(), path.display());
        Ok(())
    }
}
