//! # Gc Command Implementation
//!
//! Runs `git gc` in every local clone. Arguments after `--` are passed on to
//! git unchanged:
//!
//! ```bash
//! git-manager gc -- --aggressive --prune=now
//! ```

use anyhow::Result;
use clap::Args;

use git_manager::description::RepositoryDescription;
use git_manager::error;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

/// Garbage-collect every local clone
#[derive(Args, Debug)]
pub struct GcArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Extra arguments for `git gc`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

struct Gc {
    args: Vec<String>,
}

impl RepoCommand for Gc {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        ui.git(|mode| repo.local().gc(&self.args, mode))
    }
}

pub fn execute(args: GcArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args.batch, &Gc { args: args.args })
}
