//! # CLI Command Implementations
//!
//! Each subcommand of `git-manager` lives in its own file with an `Args`
//! struct derived using `clap` and an `execute` function. Commands that
//! run once per configured repository implement [`batch::RepoCommand`] and
//! share the runner in [`batch`].

pub mod batch;
pub mod clone;
pub mod completions;
pub mod gc;
pub mod ls;
pub mod reconfigure;
pub mod setup;
pub mod state;
pub mod status;
pub mod sync;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use git_manager::file::ConfigFile;
use git_manager::suggestions;

/// Settings shared by every command, taken from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit `--config` path, bypassing lookup.
    pub config: Option<PathBuf>,
}

impl Context {
    /// The configuration file to use, if one exists or was requested.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(ConfigFile::find)
    }

    /// Loads the configuration file, failing with hints if there is none.
    pub fn load(&self) -> Result<ConfigFile> {
        let path = match self.config_path() {
            Some(path) if path.is_file() => path,
            _ => return Err(suggestions::config_not_found(self.config.as_deref())),
        };
        debug!("using configuration {}", path.display());
        ConfigFile::open(&path).map_err(|e| suggestions::config_invalid(&path, e))
    }
}
