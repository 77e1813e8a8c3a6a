//! # Reconfigure Command Implementation
//!
//! Searches a directory for existing clones and adds every one of them to
//! the configuration file, creating the base directories they need. When no
//! configuration file exists yet, a new one is created at the default
//! location.
//!
//! ## Options
//!
//! - `--simulate`: print the resulting file instead of writing it
//! - `--rebuild`: regenerate the file from its repositories, dropping
//!   comments, empty directories and custom formatting
//! - `--clear`: start from an empty file
//! - `--follow-symlinks`, `--allow-subrepositories`: discovery options

use anyhow::{anyhow, Result};
use clap::Args;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use git_manager::error::Error;
use git_manager::file::ConfigFile;
use git_manager::finder::Finder;
use git_manager::suggestions;

use super::Context;

/// Add existing repositories to the configuration file
#[derive(Args, Debug)]
pub struct ReconfigureArgs {
    /// Print the resulting configuration instead of writing it
    #[arg(short, long)]
    pub simulate: bool,

    /// Rebuild the configuration, removing empty groups and comments
    #[arg(short, long)]
    pub rebuild: bool,

    /// Remove all existing entries first
    #[arg(short, long)]
    pub clear: bool,

    /// Descend into symlinked directories while searching
    #[arg(short, long)]
    pub follow_symlinks: bool,

    /// Keep searching inside repositories that were already found
    #[arg(short, long)]
    pub allow_subrepositories: bool,

    /// Directory to search for repositories.
    ///
    /// Defaults to the current directory unless only rebuilding.
    pub path: Option<PathBuf>,
}

/// The configuration to modify: the existing file, or an empty one at the
/// requested or default location.
fn open_or_create(ctx: &Context) -> Result<ConfigFile> {
    if let Some(path) = ctx.config_path().filter(|p| p.is_file()) {
        return ConfigFile::open(&path).map_err(|e| suggestions::config_invalid(&path, e));
    }

    let path = ctx
        .config
        .clone()
        .or_else(ConfigFile::default_location)
        .ok_or_else(|| anyhow!("Cannot determine a location for the configuration file"))?;
    info!("starting a new configuration at {}", path.display());
    Ok(ConfigFile::new(path))
}

/// Execute the `reconfigure` command.
pub fn execute(args: ReconfigureArgs, ctx: &Context) -> Result<()> {
    let mut file = open_or_create(ctx)?;

    let search = match args.path {
        Some(path) => Some(path),
        None if !args.rebuild => Some(std::env::current_dir()?),
        None => None,
    };

    if args.clear {
        file.tree_mut().set_lines(Vec::new());
    }

    if let Some(search) = search {
        let search = fs::canonicalize(&search)
            .map_err(|e| anyhow!("Cannot search {}: {}", search.display(), e))?;
        let finder = Finder::new(search)
            .follow_symlinks(args.follow_symlinks)
            .allow_subrepositories(args.allow_subrepositories);

        for desc in finder.iter() {
            match file.tree_mut().insert_repo_or_get(&desc) {
                Ok(_) => eprintln!("Found {} in {}", desc.source, desc.path.display()),
                Err(e @ Error::UnwritableField { .. }) => {
                    warn!("skipping {}: {e}", desc.path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    if args.rebuild {
        file.tree_mut().rebuild()?;
    }

    if args.simulate {
        print!("{}", file.render());
    } else {
        file.write()?;
        eprintln!("Wrote {}", file.path().display());
    }
    Ok(())
}
