//! # Git Manager CLI
//!
//! Binary entry point for the `git-manager` command-line tool. It parses
//! the command line with `clap` and hands over to the selected command; all
//! configuration handling lives in the `git_manager` library.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    cli::Cli::parse().execute()
}
