//! Discovery of existing repositories below a directory.
//!
//! [`Finder`] walks a directory tree with `walkdir` and yields a
//! [`RepositoryDescription`] for every git work tree it meets. The walk is
//! lazy; calling [`Finder::iter`] again starts a fresh one.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::description::RepositoryDescription;
use crate::error::Result;
use crate::git::LocalRepository;

/// Builder for a recursive repository search.
#[derive(Debug, Clone)]
pub struct Finder {
    root: PathBuf,
    follow_symlinks: bool,
    allow_subrepositories: bool,
}

impl Finder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            allow_subrepositories: false,
        }
    }

    /// Descend into symlinked directories. Link cycles are reported and
    /// skipped by the walker.
    pub fn follow_symlinks(mut self, yes: bool) -> Self {
        self.follow_symlinks = yes;
        self
    }

    /// Keep searching inside repositories that were already found.
    pub fn allow_subrepositories(mut self, yes: bool) -> Self {
        self.allow_subrepositories = yes;
        self
    }

    pub fn iter(&self) -> FinderIter {
        FinderIter {
            walker: WalkDir::new(&self.root)
                .follow_links(self.follow_symlinks)
                .sort_by_file_name()
                .into_iter(),
            allow_subrepositories: self.allow_subrepositories,
        }
    }
}

impl IntoIterator for &Finder {
    type Item = RepositoryDescription;
    type IntoIter = FinderIter;

    fn into_iter(self) -> FinderIter {
        self.iter()
    }
}

/// A single pass over the directory tree of a [`Finder`].
pub struct FinderIter {
    walker: walkdir::IntoIter,
    allow_subrepositories: bool,
}

impl Iterator for FinderIter {
    type Item = RepositoryDescription;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            // unfollowed symlinks report their own type and end up here too
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name() == ".git" {
                self.walker.skip_current_dir();
                continue;
            }

            debug!("scanning {}", entry.path().display());
            match get_from_path(entry.path()) {
                Ok(Some(description)) => {
                    if !self.allow_subrepositories {
                        self.walker.skip_current_dir();
                    }
                    return Some(description);
                }
                Ok(None) => {}
                Err(e) => warn!("cannot inspect {}: {e}", entry.path().display()),
            }
        }
    }
}

/// Describes the repository at exactly `path`, if there is one with a
/// remote. The `origin` remote is preferred over any other.
pub fn get_from_path(path: &Path) -> Result<Option<RepositoryDescription>> {
    let local = LocalRepository::new(path);
    if !local.exists() {
        return Ok(None);
    }

    let url = match local.remote_url("origin")? {
        Some(url) => Some(url),
        None => match local.remotes()?.first() {
            Some(name) => local.remote_url(name)?,
            None => None,
        },
    };

    match url {
        Some(url) => Ok(Some(RepositoryDescription::new(url, path))),
        None => {
            debug!("{} has no remotes, skipping", path.display());
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{git_available, init_repo, run_git};
    use tempfile::TempDir;

    fn repo_with_remote(dir: &Path, name: &str, url: &str) {
        init_repo(dir);
        run_git(dir, &["remote", "add", name, url]);
    }

    /// a (origin), a/sub (origin), b/c (upstream only), d (no remote)
    fn layout() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        repo_with_remote(&root.join("a"), "origin", "https://example.com/a.git");
        repo_with_remote(&root.join("a").join("sub"), "origin", "https://example.com/sub.git");
        repo_with_remote(&root.join("b").join("c"), "upstream", "https://example.com/c.git");
        init_repo(&root.join("d"));
        temp
    }

    fn sources(finder: &Finder) -> Vec<(String, PathBuf)> {
        finder.iter().map(|d| (d.source, d.path)).collect()
    }

    #[test]
    fn test_get_from_path() {
        if !git_available() {
            return;
        }
        let temp = layout();
        let root = temp.path();

        assert_eq!(
            get_from_path(&root.join("a")).unwrap(),
            Some(RepositoryDescription::new(
                "https://example.com/a.git",
                root.join("a")
            ))
        );
        assert_eq!(
            get_from_path(&root.join("b").join("c")).unwrap().map(|d| d.source),
            Some("https://example.com/c.git".to_string())
        );
        assert_eq!(get_from_path(&root.join("d")).unwrap(), None);
        assert_eq!(get_from_path(&root.join("b")).unwrap(), None);
    }

    #[test]
    fn test_origin_is_preferred() {
        if !git_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("r");
        repo_with_remote(&dir, "aaa", "https://example.com/first.git");
        run_git(&dir, &["remote", "add", "origin", "https://example.com/origin.git"]);

        assert_eq!(
            get_from_path(&dir).unwrap().map(|d| d.source),
            Some("https://example.com/origin.git".to_string())
        );
    }

    #[test]
    fn test_find_stops_at_repositories() {
        if !git_available() {
            return;
        }
        let temp = layout();
        let root = temp.path();

        assert_eq!(
            sources(&Finder::new(root)),
            vec![
                ("https://example.com/a.git".to_string(), root.join("a")),
                ("https://example.com/c.git".to_string(), root.join("b").join("c")),
            ]
        );
    }

    #[test]
    fn test_find_subrepositories() {
        if !git_available() {
            return;
        }
        let temp = layout();
        let root = temp.path();

        let found = sources(&Finder::new(root).allow_subrepositories(true));
        assert_eq!(
            found.iter().map(|(_, p)| p.clone()).collect::<Vec<_>>(),
            vec![root.join("a"), root.join("a").join("sub"), root.join("b").join("c")]
        );
    }

    #[test]
    fn test_iter_is_restartable() {
        if !git_available() {
            return;
        }
        let temp = layout();
        let finder = Finder::new(temp.path());
        let first = sources(&finder);
        assert_eq!(first.len(), 2);
        assert_eq!(sources(&finder), first);
        assert_eq!((&finder).into_iter().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        if !git_available() {
            return;
        }
        let outside = TempDir::new().unwrap();
        repo_with_remote(&outside.path().join("linked"), "origin", "https://example.com/l.git");

        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        assert!(sources(&Finder::new(temp.path())).is_empty());
        assert_eq!(
            sources(&Finder::new(temp.path()).follow_symlinks(true)),
            vec![(
                "https://example.com/l.git".to_string(),
                temp.path().join("link").join("linked")
            )]
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Finder::new(temp.path()).iter().next().is_none());
    }
}
