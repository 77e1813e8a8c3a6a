//! # Configuration Tree
//!
//! The [`Tree`] is the in-memory model of a configuration file: an ordered
//! list of [`ConfigLine`]s plus the home directory that anchors relative
//! paths. It has two halves.
//!
//! ## Resolution
//!
//! [`Tree::descriptions`] walks the lines top to bottom while threading a
//! stack of scopes. `stack[0]` is the root directory; a base line at depth
//! `d` replaces everything from `stack[d]` on with its own directory, and a
//! repository line resolves against the top of the stack. A base line
//! deeper than `stack.len()` skips a level and is a structural error.
//!
//! ## Insertion
//!
//! [`Tree::insert_at`] adds a single line at the end of an existing scope,
//! [`Tree::insert_base_or_get`] and [`Tree::insert_repo_or_get`] build on it
//! to create missing ancestor scopes on demand, and [`Tree::rebuild`]
//! regenerates a canonical file from the resolved repositories alone.
//! Every inserted field is checked to read back unchanged, and a failed call
//! leaves the tree unchanged, including any ancestor scopes it had already
//! created.

use std::path::{Path, PathBuf};

use log::debug;

use crate::description::{BaseDescription, Description, RepositoryDescription};
use crate::error::{Error, Result};
use crate::git::LocalRepository;
use crate::line::{
    check_path_field, check_url_field, BaseLine, ConfigLine, RepoLine, RootLine, DEFAULT_PATTERN,
};
use crate::locator;
use crate::path::{escapes, expand_user, relative_to};

/// Unit of indentation added for each nesting level.
const INDENT: &str = " ";

/// A directory scope on the resolution stack.
#[derive(Debug, Clone)]
struct Scope {
    folder: PathBuf,
    pattern: String,
}

/// A structural line together with everything resolution knows about it.
#[derive(Debug, Clone)]
struct Resolved {
    index: usize,
    description: Description,
    /// Depth of the scope this line opens (bases) or lives in (repositories).
    depth: usize,
    /// Url pattern in effect inside that scope.
    pattern: String,
}

/// An ordered, editable list of configuration lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    lines: Vec<ConfigLine>,
    home: PathBuf,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates an empty tree anchored at the user's home directory.
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir().unwrap_or_default())
    }

    /// Creates an empty tree anchored at an explicit home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            lines: Vec::new(),
            home: home.into(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    pub fn set_lines(&mut self, lines: Vec<ConfigLine>) {
        self.lines = lines;
    }

    /// The root all top-level paths are relative to: the first `##` line if
    /// any, else the home directory.
    pub fn root(&self) -> PathBuf {
        self.lines
            .iter()
            .find_map(|line| match line {
                ConfigLine::Root(root) => Some(self.home.join(expand_user(&root.root, &self.home))),
                _ => None,
            })
            .unwrap_or_else(|| self.home.clone())
    }

    fn resolve(&self) -> Result<Vec<Resolved>> {
        let mut stack = vec![Scope {
            folder: self.root(),
            pattern: DEFAULT_PATTERN.to_string(),
        }];
        let mut resolved = Vec::new();

        for (index, line) in self.lines.iter().enumerate() {
            match line {
                ConfigLine::Base(base) => {
                    if base.depth == 0 || base.depth > stack.len() {
                        return Err(Error::MissingSublevel { line: index + 1 });
                    }

                    let previous = &stack[base.depth - 1];
                    let scope = Scope {
                        folder: previous.folder.join(expand_user(&base.path, &self.home)),
                        pattern: previous.pattern.replace("%s", base.effective_pattern()),
                    };

                    stack.truncate(base.depth);
                    resolved.push(Resolved {
                        index,
                        description: BaseDescription::new(scope.folder.clone()).into(),
                        depth: base.depth,
                        pattern: scope.pattern.clone(),
                    });
                    stack.push(scope);
                }
                ConfigLine::Repo(repo) => {
                    let scope = &stack[stack.len() - 1];
                    let source = scope.pattern.replace("%s", &repo.url);
                    let name = if repo.path.is_empty() {
                        PathBuf::from(locator::humanish_part(&source))
                    } else {
                        expand_user(&repo.path, &self.home)
                    };

                    resolved.push(Resolved {
                        index,
                        description: RepositoryDescription::new(source, scope.folder.join(name))
                            .into(),
                        depth: stack.len() - 1,
                        pattern: scope.pattern.clone(),
                    });
                }
                ConfigLine::Comment(_) | ConfigLine::Root(_) => {}
            }
        }

        Ok(resolved)
    }

    /// Every structural line as `(line index, description)`, in file order.
    pub fn descriptions(&self) -> Result<Vec<(usize, Description)>> {
        Ok(self
            .resolve()?
            .into_iter()
            .map(|r| (r.index, r.description))
            .collect())
    }

    /// All repositories, in file order.
    pub fn repositories(&self) -> Result<Vec<RepositoryDescription>> {
        Ok(self
            .resolve()?
            .into_iter()
            .filter_map(|r| match r.description {
                Description::Repository(repo) => Some(repo),
                Description::Base(_) => None,
            })
            .collect())
    }

    /// Local handles of all repositories, in file order.
    pub fn locals(&self) -> Result<Vec<LocalRepository>> {
        Ok(self.repositories()?.iter().map(|r| r.local()).collect())
    }

    /// Index of the first line resolving to `description`.
    pub fn index(&self, description: &Description) -> Result<Option<usize>> {
        Ok(self
            .resolve()?
            .into_iter()
            .find(|r| &r.description == description)
            .map(|r| r.index))
    }

    pub fn contains(&self, description: &Description) -> Result<bool> {
        Ok(self.index(description)?.is_some())
    }

    /// Inserts a single line for `description` at the end of the scope
    /// `parent` (the top level if `None`), returning its index.
    ///
    /// Repositories go after the scope's existing repositories and before any
    /// nested base; bases go after everything nested inside the scope.
    pub fn insert_at(
        &mut self,
        parent: Option<&BaseDescription>,
        description: &Description,
    ) -> Result<usize> {
        let (start, depth, folder, pattern, parent_indent) = match parent {
            None => (0, 0, self.root(), DEFAULT_PATTERN.to_string(), String::new()),
            Some(parent) => {
                let target = Description::Base(parent.clone());
                let found = self
                    .resolve()?
                    .into_iter()
                    .find(|r| r.description == target)
                    .ok_or_else(|| Error::ParentNotFound {
                        parent: parent.folder.clone(),
                    })?;
                (
                    found.index + 1,
                    found.depth,
                    parent.folder.clone(),
                    found.pattern,
                    self.lines[found.index].indent().to_string(),
                )
            }
        };

        let (position, line) = match description {
            Description::Repository(repo) => {
                if repo.path.parent() != Some(folder.as_path()) {
                    return Err(Error::ScopeMismatch {
                        path: repo.path.clone(),
                        scope: folder,
                    });
                }

                let url = invert_pattern(&pattern, &repo.source).ok_or_else(|| {
                    Error::PatternMismatch {
                        url: repo.source.clone(),
                        pattern: pattern.clone(),
                    }
                })?;

                let name = repo
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let path = if name == locator::humanish_part(&repo.source) {
                    String::new()
                } else {
                    name
                };

                check_url_field(&url)?;
                if !path.is_empty() {
                    check_path_field(&path)?;
                }

                let end = self.lines[start..]
                    .iter()
                    .position(ConfigLine::is_base)
                    .map_or(self.lines.len(), |offset| start + offset);

                let indent = self.lines[start..end]
                    .iter()
                    .rev()
                    .find_map(|line| match line {
                        ConfigLine::Repo(sibling) => Some(sibling.indent.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| format!("{}{}", parent_indent, INDENT));

                (end, ConfigLine::Repo(RepoLine::new(indent, url, path)))
            }
            Description::Base(base) => {
                let relative = relative_to(&base.folder, &folder);
                let path = if escapes(&relative) {
                    base.folder.to_string_lossy().to_string()
                } else if relative.as_os_str().is_empty() {
                    ".".to_string()
                } else {
                    relative.to_string_lossy().to_string()
                };
                check_path_field(&path)?;

                let end = self.lines[start..]
                    .iter()
                    .position(|line| matches!(line, ConfigLine::Base(b) if b.depth <= depth))
                    .map_or(self.lines.len(), |offset| start + offset);

                let indent = self.lines[start..end]
                    .iter()
                    .rev()
                    .find_map(|line| match line {
                        ConfigLine::Base(sibling) if sibling.depth == depth + 1 => {
                            Some(sibling.indent.clone())
                        }
                        _ => None,
                    })
                    .unwrap_or_else(|| format!("{}{}", parent_indent, INDENT));

                (end, ConfigLine::Base(BaseLine::new(indent, depth + 1, path)))
            }
        };

        debug!("inserting {:?} at line {}", line.write(), position + 1);
        self.lines.insert(position, line);
        Ok(position)
    }

    /// Returns the index of `base`, inserting it and any missing ancestor
    /// scopes below the root first.
    pub fn insert_base_or_get(&mut self, base: &BaseDescription) -> Result<usize> {
        self.atomically(|tree| tree.base_or_get(base))
    }

    /// Returns the index of `repo`, inserting it and any missing scopes it
    /// lives in first.
    pub fn insert_repo_or_get(&mut self, repo: &RepositoryDescription) -> Result<usize> {
        self.atomically(|tree| tree.repo_or_get(repo))
    }

    /// Runs a multi-line edit, restoring the lines if any step fails.
    fn atomically(&mut self, edit: impl FnOnce(&mut Self) -> Result<usize>) -> Result<usize> {
        let before = self.lines.clone();
        let result = edit(self);
        if result.is_err() {
            self.lines = before;
        }
        result
    }

    fn base_or_get(&mut self, base: &BaseDescription) -> Result<usize> {
        let target = Description::Base(base.clone());
        if let Some(index) = self.index(&target)? {
            return Ok(index);
        }

        match self.enclosing_scope(&base.folder) {
            Some(parent) => {
                self.base_or_get(&parent)?;
                self.insert_at(Some(&parent), &target)
            }
            None => self.insert_at(None, &target),
        }
    }

    fn repo_or_get(&mut self, repo: &RepositoryDescription) -> Result<usize> {
        let target = Description::Repository(repo.clone());
        if let Some(index) = self.index(&target)? {
            return Ok(index);
        }

        let parent = repo
            .path
            .parent()
            .ok_or_else(|| Error::ScopeMismatch {
                path: repo.path.clone(),
                scope: self.root(),
            })?
            .to_path_buf();

        if parent == self.root() {
            return self.insert_at(None, &target);
        }

        let parent = BaseDescription::new(parent);
        self.base_or_get(&parent)?;
        self.insert_at(Some(&parent), &target)
    }

    /// The scope a new base for `folder` has to live in, or `None` if it
    /// belongs at the top level (directly below, or outside of, the root).
    fn enclosing_scope(&self, folder: &Path) -> Option<BaseDescription> {
        let root = self.root();
        let parent = folder.parent()?;
        if parent != root && parent.starts_with(&root) {
            Some(BaseDescription::new(parent))
        } else {
            None
        }
    }

    /// Removes the first repository line whose local clone is `local`.
    pub fn remove_local(&mut self, local: &LocalRepository) -> Result<Option<usize>> {
        let found = self.resolve()?.into_iter().find_map(|r| match r.description {
            Description::Repository(repo) if &repo.local() == local => Some(r.index),
            _ => None,
        });

        if let Some(index) = found {
            debug!("removing line {}", index + 1);
            self.lines.remove(index);
        }
        Ok(found)
    }

    /// Regenerates the lines from the resolved repositories, dropping
    /// comments, empty scopes and custom formatting.
    pub fn rebuild(&mut self) -> Result<()> {
        let repositories = self.repositories()?;
        let root = self.root();

        let mut fresh = Tree::with_home(self.home.clone());
        if root != self.home {
            let declared = self.lines.iter().find_map(|line| match line {
                ConfigLine::Root(r) => Some(r.root.clone()),
                _ => None,
            });
            if let Some(declared) = declared {
                fresh.lines.push(ConfigLine::Root(RootLine::new(declared)));
            }
        }

        for repo in &repositories {
            fresh.insert_repo_or_get(repo)?;
        }

        self.lines = fresh.lines;
        Ok(())
    }
}

/// Recovers the `%s` part of `source` under a url pattern. A pattern
/// without `%s` has no url that could be written for it.
fn invert_pattern(pattern: &str, source: &str) -> Option<String> {
    let (prefix, suffix) = pattern.split_once("%s")?;
    source
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .filter(|middle| !middle.is_empty())
        .map(str::to_string)
}
