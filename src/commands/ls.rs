//! The `ls` subcommand: prints the path of every repository that has a
//! local clone, one per line, in configuration order.

use anyhow::Result;

use git_manager::description::RepositoryDescription;
use git_manager::error;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

struct List;

impl RepoCommand for List {
    fn plain(&self) -> bool {
        true
    }

    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        ui.println(repo.path.display().to_string());
        Ok(true)
    }
}

pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &List)
}
