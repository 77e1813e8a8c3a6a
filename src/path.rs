//! Path manipulation utilities for git-manager

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use glob::Pattern;

/// Match a string against a shell glob pattern (`*`, `?`, `[...]`).
pub fn glob_match(pattern: &str, candidate: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches(candidate))
}

/// Expand a leading `~` into the given home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user`
/// forms are returned unchanged.
pub fn expand_user(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Compute `path` relative to `base`, lexically.
///
/// Both paths are compared component by component; every component of
/// `base` not shared with `path` becomes a `..`. An empty result means both
/// paths are the same.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path: Vec<Component<'_>> = path.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base.len() {
        result.push("..");
    }
    for component in &path[common..] {
        result.push(component.as_os_str());
    }
    result
}

/// Whether a relative path leaves the directory it is relative to.
pub fn escapes(relative: &Path) -> bool {
    matches!(relative.components().next(), Some(Component::ParentDir))
}
