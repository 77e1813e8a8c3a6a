//! # Configuration Line Grammar
//!
//! Every physical line of the configuration file parses into exactly one
//! [`ConfigLine`]. The grammar is line oriented and recognizes, in order:
//!
//! 1. `## PATH` - a [`RootLine`] overriding the root directory.
//! 2. `# anything` or a blank line - a [`CommentLine`], kept verbatim.
//! 3. `>>> PATH [PATTERN]` - a [`BaseLine`] opening a directory scope at the
//!    depth given by the number of `>` markers.
//! 4. `URL [PATH]` - a [`RepoLine`] declaring a repository.
//!
//! Each structural line stores the whitespace around its fields, so that
//! `ConfigLine::parse(s)?.write() == s` holds for every valid line.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static DIRECTIVE_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)##(\s*)(\S+)(\s*)$").expect("valid root regex"));

static DIRECTIVE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*#.*|\s*)$").expect("valid comment regex"));

static DIRECTIVE_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(>+)(\s+)(\S+)(?:(\s+)(\S+))?(\s*)$").expect("valid base regex")
});

static DIRECTIVE_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([^>\s]+)(?:(\s+)(\S+))?(\s*)$").expect("valid repo regex")
});

/// The pattern a base line uses when it does not declare one.
pub const DEFAULT_PATTERN: &str = "%s";

/// A single line of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    Comment(CommentLine),
    Root(RootLine),
    Base(BaseLine),
    Repo(RepoLine),
}

/// A line without meaning: a comment or a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    pub content: String,
}

/// A `## PATH` line declaring the root of all repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLine {
    pub indent: String,
    pub space_1: String,
    pub root: String,
    pub space_2: String,
}

/// A `> PATH [PATTERN]` line opening a directory scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseLine {
    pub indent: String,
    /// Number of `>` markers, always at least one.
    pub depth: usize,
    pub space_1: String,
    pub path: String,
    pub space_2: String,
    /// Url template with a `%s` placeholder, empty when not given.
    pub pattern: String,
    pub space_3: String,
}

/// A `URL [PATH]` line declaring a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLine {
    pub indent: String,
    pub url: String,
    pub space_1: String,
    /// Directory name override, empty when derived from the url.
    pub path: String,
    pub space_2: String,
}

impl ConfigLine {
    /// Parses a single line (without its line terminator).
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(caps) = DIRECTIVE_ROOT.captures(s) {
            return Ok(ConfigLine::Root(RootLine {
                indent: group(&caps, 1),
                space_1: group(&caps, 2),
                root: group(&caps, 3),
                space_2: group(&caps, 4),
            }));
        }

        if DIRECTIVE_COMMENT.is_match(s) {
            return Ok(ConfigLine::Comment(CommentLine {
                content: s.to_string(),
            }));
        }

        if let Some(caps) = DIRECTIVE_BASE.captures(s) {
            return Ok(ConfigLine::Base(BaseLine {
                indent: group(&caps, 1),
                depth: caps.get(2).map_or(0, |m| m.as_str().len()),
                space_1: group(&caps, 3),
                path: group(&caps, 4),
                space_2: group(&caps, 5),
                pattern: group(&caps, 6),
                space_3: group(&caps, 7),
            }));
        }

        if let Some(caps) = DIRECTIVE_REPO.captures(s) {
            return Ok(ConfigLine::Repo(RepoLine {
                indent: group(&caps, 1),
                url: group(&caps, 2),
                space_1: group(&caps, 3),
                path: group(&caps, 4),
                space_2: group(&caps, 5),
            }));
        }

        Err(Error::InvalidLine {
            content: s.to_string(),
        })
    }

    /// Turns this line back into text that re-parses into the same line.
    pub fn write(&self) -> String {
        match self {
            ConfigLine::Comment(l) => l.content.clone(),
            ConfigLine::Root(l) => format!("{}##{}{}{}", l.indent, l.space_1, l.root, l.space_2),
            ConfigLine::Base(l) => format!(
                "{}{}{}{}{}{}{}",
                l.indent,
                ">".repeat(l.depth),
                l.space_1,
                l.path,
                l.space_2,
                l.pattern,
                l.space_3
            ),
            ConfigLine::Repo(l) => {
                format!("{}{}{}{}{}", l.indent, l.url, l.space_1, l.path, l.space_2)
            }
        }
    }

    /// The leading whitespace of this line.
    pub fn indent(&self) -> &str {
        match self {
            ConfigLine::Comment(_) => "",
            ConfigLine::Root(l) => &l.indent,
            ConfigLine::Base(l) => &l.indent,
            ConfigLine::Repo(l) => &l.indent,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, ConfigLine::Base(_))
    }
}

impl fmt::Display for ConfigLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write())
    }
}

impl CommentLine {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl RootLine {
    /// Creates a root line in canonical `## PATH` form.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            indent: String::new(),
            space_1: " ".to_string(),
            root: root.into(),
            space_2: String::new(),
        }
    }
}

impl BaseLine {
    /// Creates a base line without a pattern, using single spaces.
    pub fn new(indent: impl Into<String>, depth: usize, path: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            depth,
            space_1: " ".to_string(),
            path: path.into(),
            space_2: String::new(),
            pattern: String::new(),
            space_3: String::new(),
        }
    }

    /// The url pattern of this line, falling back to [`DEFAULT_PATTERN`].
    pub fn effective_pattern(&self) -> &str {
        if self.pattern.is_empty() {
            DEFAULT_PATTERN
        } else {
            &self.pattern
        }
    }
}

impl RepoLine {
    /// Creates a repository line; an empty `path` leaves the name to be
    /// derived from the url.
    pub fn new(indent: impl Into<String>, url: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            indent: indent.into(),
            url: url.into(),
            space_1: if path.is_empty() {
                String::new()
            } else {
                " ".to_string()
            },
            path,
            space_2: String::new(),
        }
    }
}

/// Checks that `url` reads back unchanged as the url field of a
/// repository line.
pub fn check_url_field(url: &str) -> Result<()> {
    if url.is_empty() || url.contains(char::is_whitespace) || url.starts_with(['#', '>']) {
        return Err(Error::UnwritableField {
            field: "url",
            value: url.to_string(),
        });
    }
    Ok(())
}

/// Checks that `path` reads back unchanged as the path field of a base or
/// repository line. Paths starting with `~` would be expanded on reading.
pub fn check_path_field(path: &str) -> Result<()> {
    if path.is_empty()
        || path.contains(char::is_whitespace)
        || path == "~"
        || path.starts_with("~/")
    {
        return Err(Error::UnwritableField {
            field: "path",
            value: path.to_string(),
        });
    }
    Ok(())
}

fn group(caps: &regex::Captures<'_>, i: usize) -> String {
    caps.get(i)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parses the full text of a configuration file, one line per physical line.
///
/// Errors carry the 1-based number of the offending line.
pub fn parse_lines(text: &str) -> Result<Vec<ConfigLine>> {
    text.lines()
        .enumerate()
        .map(|(i, raw)| {
            ConfigLine::parse(raw).map_err(|_| Error::Grammar {
                line: i + 1,
                content: raw.to_string(),
            })
        })
        .collect()
}

/// Serializes lines back into file text, each terminated by a newline.
pub fn write_lines(lines: &[ConfigLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.write());
        out.push('\n');
    }
    out
}
