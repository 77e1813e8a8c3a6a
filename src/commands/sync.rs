//! The `fetch`, `pull` and `push` subcommands.

use anyhow::Result;

use git_manager::description::RepositoryDescription;
use git_manager::error;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

/// Fetches all remotes of every local clone.
pub struct Fetch;

/// Pulls every local clone.
pub struct Pull;

/// Pushes every local clone.
pub struct Push;

impl RepoCommand for Fetch {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        ui.git(|mode| repo.local().fetch(mode))
    }
}

impl RepoCommand for Pull {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        ui.git(|mode| repo.local().pull(mode))
    }
}

impl RepoCommand for Push {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        ui.git(|mode| repo.local().push(mode))
    }
}

pub fn fetch(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &Fetch)
}

pub fn pull(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &Pull)
}

pub fn push(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &Push)
}
