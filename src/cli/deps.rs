//! List a template's direct dependencies.

use anyhow::{Context, Result};
use clap::Args;

use super::{CliConfig, CommandContext};

#[derive(Args, Debug)]
pub struct DepsCommand {
    /// Logical template name, e.g. `topics/show`
    name: String,

    /// Print a JSON array
    #[arg(long)]
    json: bool,
}

impl DepsCommand {
    pub fn execute(self, cli: &CliConfig) -> Result<()> {
        let ctx = CommandContext::new(cli)?;
        let dependencies = ctx
            .digestor
            .dependencies(&self.name, ctx.format(), &ctx.source)
            .with_context(|| format!("Failed to read dependencies of {}", self.name))?;

        if self.json {
            println!("{}", serde_json::to_string(&dependencies)?);
        } else {
            for dependency in dependencies {
                println!("{dependency}");
            }
        }
        Ok(())
    }
}
