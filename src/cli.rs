//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use git_manager::output::OutputConfig;

use crate::commands::{self, batch::BatchArgs, Context};

/// Git Manager - Keep a collection of git repositories in one tree
#[derive(Parser, Debug)]
#[command(name = "git-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file to use instead of searching for one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["auto", "always", "never"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone every configured repository that is missing locally
    Setup(BatchArgs),

    /// Fetch all remotes of every local repository
    Fetch(BatchArgs),

    /// Pull every local repository
    Pull(BatchArgs),

    /// Push every local repository
    Push(BatchArgs),

    /// Run git gc in every local repository
    Gc(commands::gc::GcArgs),

    /// Show git status of local repositories with uncommitted changes
    Status(BatchArgs),

    /// Report local repositories that are ahead of or behind their upstream
    State(BatchArgs),

    /// List the paths of all local repositories
    Ls(BatchArgs),

    /// Clone a repository into its canonical location
    Clone(commands::clone::CloneArgs),

    /// Add existing repositories to the configuration file
    Reconfigure(commands::reconfigure::ReconfigureArgs),

    /// Display the configured repositories as a tree
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        OutputConfig::from_env_and_flag(&self.color).apply();
        let ctx = Context {
            config: self.config,
        };

        match self.command {
            Commands::Setup(args) => commands::setup::execute(args, &ctx),
            Commands::Fetch(args) => commands::sync::fetch(args, &ctx),
            Commands::Pull(args) => commands::sync::pull(args, &ctx),
            Commands::Push(args) => commands::sync::push(args, &ctx),
            Commands::Gc(args) => commands::gc::execute(args, &ctx),
            Commands::Status(args) => commands::status::execute(args, &ctx),
            Commands::State(args) => commands::state::execute(args, &ctx),
            Commands::Ls(args) => commands::ls::execute(args, &ctx),
            Commands::Clone(args) => commands::clone::execute(args, &ctx),
            Commands::Reconfigure(args) => commands::reconfigure::execute(args, &ctx),
            Commands::Tree(args) => commands::tree::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
