//! Reading, writing and locating the configuration file.
//!
//! Files are written with the line endings they were read with: a file
//! using `\r\n` keeps them, anything else is written with `\n`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::line::{parse_lines, write_lines};
use crate::tree::Tree;

/// Environment variable naming the configuration file directly.
pub const CONFIG_ENV: &str = "GIT_MANAGER_CONFIG";

const CONFIG_DIR: &str = ".gitmanager";
const CONFIG_NAME: &str = "config";

/// A configuration tree bound to a path on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    tree: Tree,
    crlf: bool,
}

impl ConfigFile {
    /// Binds an empty tree to `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_tree(path, Tree::new())
    }

    /// Like [`ConfigFile::new`], with an explicit tree.
    pub fn with_tree(path: impl Into<PathBuf>, tree: Tree) -> Self {
        Self {
            path: path.into(),
            tree,
            crlf: false,
        }
    }

    /// Binds to `path` and reads it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut file = Self::new(path);
        file.read()?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Replaces the in-memory lines with the file's current content.
    ///
    /// On a grammar error the previous lines are kept.
    pub fn read(&mut self) -> Result<()> {
        debug!("reading configuration from {}", self.path.display());
        let text = fs::read_to_string(&self.path)?;
        self.tree.set_lines(parse_lines(&text)?);
        self.crlf = text.contains("\r\n");
        Ok(())
    }

    /// The file content as it would be written.
    pub fn render(&self) -> String {
        let text = write_lines(self.tree.lines());
        if self.crlf {
            text.replace('\n', "\r\n")
        } else {
            text
        }
    }

    /// Writes every line, newline-terminated, creating parent directories.
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!("writing configuration to {}", self.path.display());
        fs::write(&self.path, self.render()).map_err(Error::from)
    }

    /// Locates the configuration file from the process environment.
    pub fn find() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        locate(
            env::var_os(CONFIG_ENV).map(PathBuf::from).as_deref(),
            env::var_os("XDG_CONFIG_HOME").map(PathBuf::from).as_deref(),
            &home,
        )
    }

    /// Where a new configuration file is created when none exists yet.
    pub fn default_location() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(xdg_location(
            env::var_os("XDG_CONFIG_HOME").map(PathBuf::from).as_deref(),
            &home,
        ))
    }
}

fn xdg_location(xdg_config_home: Option<&Path>, home: &Path) -> PathBuf {
    xdg_config_home
        .map(Path::to_path_buf)
        .unwrap_or_else(|| home.join(".config"))
        .join(CONFIG_DIR)
        .join(CONFIG_NAME)
}

/// Resolves the configuration file location, first existing file wins:
///
/// 1. `env_path` (the value of `GIT_MANAGER_CONFIG`)
/// 2. `<xdg_config_home>/.gitmanager/config`, `xdg_config_home` defaulting
///    to `<home>/.config`
/// 3. `<home>/.gitmanager`
pub fn locate(env_path: Option<&Path>, xdg_config_home: Option<&Path>, home: &Path) -> Option<PathBuf> {
    let candidates = env_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([xdg_location(xdg_config_home, home), home.join(CONFIG_DIR)]);

    for candidate in candidates {
        if candidate.is_file() {
            return Some(candidate);
        }
        debug!("no configuration at {}", candidate.display());
    }
    None
}
