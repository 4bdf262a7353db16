//! `tdigest` entry point.
//!
//! Parses arguments, runs the selected command and prints errors with
//! suggestions before exiting non-zero.

use anyhow::Result;
use clap::Parser;
use template_digest::cli;
use template_digest::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
