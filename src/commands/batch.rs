//! # Batch Runner
//!
//! Runs a [`RepoCommand`] over the configured repositories, in file order,
//! optionally filtered by url patterns. Sequential runs share the terminal
//! with git; parallel runs (`--jobs`) use a `rayon` pool and capture git's
//! output. A `[i/n] path` progress line is shown on stderr while running
//! and a `k/n repositories ok` summary at the end. The command fails if any
//! repository failed.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;

use git_manager::description::RepositoryDescription;
use git_manager::error::Error;
use git_manager::git::OutputMode;
use git_manager::output::{short_path, terminal_width};
use git_manager::suggestions;

use super::Context;

/// Options shared by all batch commands.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Only include repositories whose url matches one of these glob
    /// patterns (e.g. "org/*", "github.com:org/repo").
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Number of repositories to process in parallel; 0 uses one per CPU.
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,
}

/// A command that runs once per repository and reports success.
pub trait RepoCommand: Sync {
    /// Skip repositories without a local clone.
    fn local_only(&self) -> bool {
        true
    }

    /// Plain commands print their own output, without progress or summary.
    fn plain(&self) -> bool {
        false
    }

    fn run(&self, repo: &RepositoryDescription, ui: &Progress) -> git_manager::error::Result<bool>;
}

/// Terminal access for a running command.
pub struct Progress {
    bar: ProgressBar,
    mode: OutputMode,
}

impl Progress {
    fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            mode: OutputMode::Inherit,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Prints a line to stdout without garbling the progress line.
    pub fn println(&self, message: impl AsRef<str>) {
        self.bar.suspend(|| println!("{}", message.as_ref()));
    }

    /// Runs a git operation, hiding the progress line while git owns the
    /// terminal.
    pub fn git<R>(&self, f: impl FnOnce(OutputMode) -> R) -> R {
        match self.mode {
            OutputMode::Inherit => self.bar.suspend(|| f(OutputMode::Inherit)),
            OutputMode::Capture => f(OutputMode::Capture),
        }
    }
}

/// Keeps the repositories matching any of `patterns`, all if there are none.
pub fn select(
    repos: Vec<RepositoryDescription>,
    patterns: &[String],
) -> Result<Vec<RepositoryDescription>> {
    if patterns.is_empty() {
        return Ok(repos);
    }

    let names: Vec<String> = repos.iter().map(|r| r.remote().humanish_part()).collect();
    let mut selected = Vec::new();
    for repo in repos {
        for pattern in patterns {
            let matched = repo.remote().matches(pattern).map_err(|e| match e {
                Error::Glob(err) => suggestions::invalid_glob(pattern, &err),
                other => other.into(),
            })?;
            if matched {
                selected.push(repo);
                break;
            }
        }
    }

    if selected.is_empty() {
        return Err(suggestions::no_matching_repositories(patterns, &names));
    }
    Ok(selected)
}

/// Runs `command` over the configured repositories.
pub fn run<C: RepoCommand>(ctx: &Context, args: &BatchArgs, command: &C) -> Result<()> {
    let file = ctx.load()?;
    let repos = file
        .tree()
        .repositories()
        .map_err(|e| suggestions::config_invalid(file.path(), e))?;

    let mut repos = select(repos, &args.patterns)?;
    if command.local_only() {
        repos.retain(|repo| repo.local().exists());
    }

    if command.plain() {
        let ui = Progress::hidden();
        for repo in &repos {
            command.run(repo, &ui)?;
        }
        return Ok(());
    }

    let total = repos.len();
    let digits = total.to_string().len();
    let home: PathBuf = dirs::home_dir().unwrap_or_default();

    let bar = ProgressBar::new(total as u64);
    bar.set_style(ProgressStyle::with_template("{prefix} {wide_msg}")?);
    let ui = Progress {
        bar: bar.clone(),
        mode: if args.jobs == 1 {
            OutputMode::Inherit
        } else {
            OutputMode::Capture
        },
    };

    let run_one = |(i, repo): (usize, &RepositoryDescription)| -> bool {
        let prefix = format!("[{:0digits$}/{total}]", i + 1);
        let room = terminal_width()
            .unwrap_or(80)
            .saturating_sub(prefix.len() + 1);
        bar.set_prefix(prefix);
        bar.set_message(short_path(&repo.path, &home, room));

        let ok = match command.run(repo, &ui) {
            Ok(ok) => ok,
            Err(e) => {
                warn!("{}: {e}", repo.path.display());
                false
            }
        };
        bar.inc(1);
        ok
    };

    let succeeded = if args.jobs == 1 {
        repos.iter().enumerate().filter(|&item| run_one(item)).count()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build()?;
        pool.install(|| {
            repos
                .par_iter()
                .enumerate()
                .filter(|&item| run_one(item))
                .count()
        })
    };
    bar.finish_and_clear();

    let summary = format!("{succeeded}/{total} repositories ok");
    if succeeded < total {
        eprintln!("{}", style(summary).red());
        bail!("{} of {} repositories failed", total - succeeded, total);
    }
    eprintln!("{}", style(summary).green());
    Ok(())
}
