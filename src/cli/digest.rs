//! Print template digests.
//!
//! ```bash
//! tdigest digest topics/show topics/index
//! tdigest digest --all --json
//! tdigest digest comments/comment --partial
//! ```
//!
//! All templates in one invocation share a cache, so a partial rendered by many
//! templates is hashed once. A missing template is reported but does not fail the
//! command: it digests to an empty string, as it would inside a dependency tree.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;

use super::{CliConfig, CommandContext};
use crate::core::TemplateRef;
use crate::digest::DigestOptions;

#[derive(Args, Debug)]
pub struct DigestCommand {
    /// Logical template names, e.g. `topics/show`
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    names: Vec<String>,

    /// Digest every non-partial template under the root
    #[arg(long)]
    all: bool,

    /// Look the named templates up as partials
    #[arg(long)]
    partial: bool,

    /// Print a JSON object mapping `<name>.<format>` to digest
    #[arg(long)]
    json: bool,
}

impl DigestCommand {
    pub fn execute(self, cli: &CliConfig) -> Result<()> {
        let ctx = CommandContext::new(cli)?;

        let templates = if self.all {
            ctx.source.templates(false).context("Failed to enumerate templates")?
        } else {
            self.names.iter().map(|name| TemplateRef::new(name.as_str(), ctx.format())).collect()
        };

        let options = DigestOptions {
            partial: self.partial,
        };

        let mut digests = BTreeMap::new();
        for template in &templates {
            let digest = ctx
                .digestor
                .digest(template.name(), template.format(), &ctx.source, options)
                .with_context(|| format!("Failed to digest {template}"))?;
            digests.insert(template.cache_key(), digest);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&digests)?);
            return Ok(());
        }

        // Keep the order the names were given in
        for template in &templates {
            let key = template.cache_key();
            match digests.get(&key).map(String::as_str) {
                Some("") | None => println!("{}  {}", key, "(missing)".bright_black()),
                Some(digest) => println!("{}  {}", key.cyan(), digest),
            }
        }

        Ok(())
    }
}
