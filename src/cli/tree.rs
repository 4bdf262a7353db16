//! Display a template's dependencies as a tree.
//!
//! ```text
//! topics/show.html
//! ├── comments/comments
//! │   └── comments/comment
//! └── topics/topic
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::{CliConfig, CommandContext};
use crate::core::TemplateRef;
use crate::digest::NestedDependency;

#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Logical template name, e.g. `topics/show`
    name: String,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Print the nested listing as JSON
    #[arg(long)]
    json: bool,
}

impl TreeCommand {
    pub fn execute(self, cli: &CliConfig) -> Result<()> {
        let ctx = CommandContext::new(cli)?;
        let nested = ctx
            .digestor
            .nested_dependencies(&self.name, ctx.format(), &ctx.source)
            .with_context(|| format!("Failed to walk dependencies of {}", self.name))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&nested)?);
        } else {
            let root = TemplateRef::new(self.name.as_str(), ctx.format());
            print!("{}", render_tree(&root.to_string(), &nested, self.depth));
        }
        Ok(())
    }
}

/// Render a nested listing with box-drawing connectors, one entry per line.
pub(crate) fn render_tree(root: &str, entries: &[NestedDependency], depth: Option<usize>) -> String {
    let mut out = format!("{}\n", root.bold());
    render_entries(&mut out, entries, "", 0, depth);
    out
}

fn render_entries(
    out: &mut String,
    entries: &[NestedDependency],
    prefix: &str,
    current_depth: usize,
    max_depth: Option<usize>,
) {
    if max_depth.is_some_and(|max| current_depth >= max) {
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let is_last = i == entries.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(&format!("{prefix}{connector}{}\n", entry.name().cyan()));

        let child_prefix = if is_last { format!("{prefix}    ") } else { format!("{prefix}│   ") };
        render_entries(out, entry.dependencies(), &child_prefix, current_depth + 1, max_depth);
    }
}
