//! Resolved descriptions of configuration lines.
//!
//! A [`Description`] is what a structural line of the configuration means
//! once its path has been resolved against the enclosing scopes: either a
//! directory ([`BaseDescription`]) or a repository
//! ([`RepositoryDescription`]). Both are plain values compared structurally.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::git::{LocalRepository, RemoteRepository};

/// A directory node of the resolved tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseDescription {
    pub folder: PathBuf,
}

/// A repository: where it comes from and where it lives locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryDescription {
    pub source: String,
    pub path: PathBuf,
}

/// Either kind of resolved line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Description {
    Base(BaseDescription),
    Repository(RepositoryDescription),
}

impl BaseDescription {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

impl RepositoryDescription {
    pub fn new(source: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            path: path.into(),
        }
    }

    /// The local clone this description points to.
    pub fn local(&self) -> LocalRepository {
        LocalRepository::new(&self.path)
    }

    /// The remote repository this description is cloned from.
    pub fn remote(&self) -> RemoteRepository {
        RemoteRepository::new(&self.source)
    }
}

impl Description {
    /// The directory this description resolves to.
    pub fn path(&self) -> &Path {
        match self {
            Description::Base(base) => &base.folder,
            Description::Repository(repo) => &repo.path,
        }
    }
}

impl From<BaseDescription> for Description {
    fn from(base: BaseDescription) -> Self {
        Description::Base(base)
    }
}

impl From<RepositoryDescription> for Description {
    fn from(repo: RepositoryDescription) -> Self {
        Description::Repository(repo)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Base(base) => write!(f, "{}", base.folder.display()),
            Description::Repository(repo) => {
                write!(f, "{} -> {}", repo.source, repo.path.display())
            }
        }
    }
}
