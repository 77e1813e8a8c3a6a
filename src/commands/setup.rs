//! The `setup` subcommand: clones every configured repository that has no
//! local clone yet. Existing clones count as successes.

use anyhow::Result;

use git_manager::description::RepositoryDescription;
use git_manager::error;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

struct Setup;

impl RepoCommand for Setup {
    fn local_only(&self) -> bool {
        false
    }

    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        let local = repo.local();
        if local.exists() {
            return Ok(true);
        }
        ui.git(|mode| repo.remote().clone_into(&local, &[], mode))
    }
}

pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &Setup)
}
