//! The `status` subcommand: shows `git status` for every local clone with
//! uncommitted changes. Clean clones count as successes.

use anyhow::Result;
use console::style;

use git_manager::description::RepositoryDescription;
use git_manager::error;
use git_manager::git::OutputMode;

use super::batch::{self, BatchArgs, Progress, RepoCommand};
use super::Context;

struct Status;

impl RepoCommand for Status {
    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> error::Result<bool> {
        let local = repo.local();
        let changes = match local.local_status()? {
            None => return Ok(false),
            Some(changes) if changes.is_empty() => return Ok(true),
            Some(changes) => changes,
        };

        ui.println(style(local.path().display()).bold().to_string());
        match ui.mode() {
            OutputMode::Inherit => {
                ui.git(|_| local.print_status())?;
            }
            // parallel runs would interleave full status output
            OutputMode::Capture => ui.println(changes.trim_end()),
        }
        Ok(false)
    }
}

pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    batch::run(ctx, &args, &Status)
}
