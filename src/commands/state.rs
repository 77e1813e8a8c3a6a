//! The `state` subcommand: compares every local clone's branch with its
//! upstream and reports those that need a pull, a push or a merge.

use anyhow::Result;
use console::style;

use git_manager::description::RepositoryDescription;
use git_manager::error;
use git_manager::git::RemoteStatus;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

struct State;

impl RepoCommand for State {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        let local = repo.local();
        let message = match local.remote_status()? {
            None => return Ok(false),
            Some(RemoteStatus::UpToDate) => return Ok(true),
            Some(RemoteStatus::RemoteNewer) => {
                style("Upstream is ahead of your branch, pull required.").yellow()
            }
            Some(RemoteStatus::LocalNewer) => {
                style("Your branch is ahead of upstream, push required.").green()
            }
            Some(RemoteStatus::Divergence) => {
                style("Your branch and upstream have diverged, merge or rebase required.").red()
            }
            Some(RemoteStatus::NoUpstream) => style("No upstream branch configured.").yellow(),
        };

        ui.println(format!("{}: {}", local.path().display(), message));
        Ok(false)
    }
}

pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &State)
}
