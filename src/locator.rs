//! # Repository Locator Model
//!
//! Remote repositories are identified by locators in one of the forms git
//! understands: `scheme://[user@]host/path`, scp-like `[user@]host:path`, or
//! a plain local path. This module decomposes any of them into an ordered
//! list of components, host first, so that repositories can be named and
//! filtered independently of protocol:
//!
//! ```
//! use git_manager::locator::{components, humanish_part, matches};
//!
//! assert_eq!(
//!     components("git@github.com:org/repo.git"),
//!     vec!["github.com", "org", "repo"]
//! );
//! assert_eq!(humanish_part("https://github.com/org/repo/"), "repo");
//! assert!(matches("ssh://git@github.com/Org/Repo.git", "org/repo").unwrap());
//! ```

use crate::error::Result;
use crate::path::glob_match;

/// User names that only identify the hosting service, never a person.
const ANONYMOUS_USERS: &[&str] = &["git", "gogs"];

fn split_segments(s: &str) -> impl Iterator<Item = &str> {
    s.split(['/', '\\', ':']).filter(|part| !part.is_empty())
}

/// Strip a trailing `.git` and any trailing slashes.
fn trim_locator(locator: &str) -> &str {
    let trimmed = locator.strip_suffix(".git").unwrap_or(locator);
    trimmed.trim_end_matches('/')
}

/// Decompose a locator into its host and path components.
pub fn components(locator: &str) -> Vec<String> {
    let url = trim_locator(locator);

    let (prefix, rest) = if let Some((_, after_scheme)) = url.split_once("://") {
        match after_scheme.find(['/', '\\', ':']) {
            Some(i) => (&after_scheme[..i], &after_scheme[i + 1..]),
            None => (after_scheme, ""),
        }
    } else if let Some((prefix, rest)) = url
        .split_once(':')
        .filter(|(prefix, _)| !prefix.contains(['/', '\\']))
    {
        (prefix, rest)
    } else {
        // A local path: there is no host, so every segment is a component.
        return split_segments(url).map(str::to_string).collect();
    };

    let (user, host) = match prefix.rsplit_once('@') {
        Some((user, host)) => (Some(user), host),
        None => (None, prefix),
    };

    let mut parts = Vec::new();
    if !host.is_empty() {
        parts.push(host.to_string());
    }
    if let Some(user) = user {
        if !user.is_empty() && !ANONYMOUS_USERS.contains(&user) {
            parts.push(user.to_string());
        }
    }
    parts.extend(split_segments(rest).map(str::to_string));
    parts
}

/// The canonical short name of a locator, i.e. its last component.
///
/// See `man git-clone` for the notion of a "humanish" directory name.
pub fn humanish_part(locator: &str) -> String {
    components(locator).pop().unwrap_or_default()
}

/// Check whether any contiguous run of the locator's components matches a
/// glob pattern, case-insensitively.
///
/// A pattern without a `:` is taken to omit the host, so `org/repo` matches
/// the same repository on any host and over any protocol.
pub fn matches(locator: &str, pattern: &str) -> Result<bool> {
    let locator = locator.to_lowercase();
    let pattern = pattern.to_lowercase();

    let haystack = components(&locator);
    let needle = components(&pattern);

    if needle.is_empty() {
        return Ok(true);
    }
    if needle.len() > haystack.len() {
        return Ok(false);
    }

    let joined_pattern = needle.join("/");
    for window in haystack.windows(needle.len()) {
        if glob_match(&joined_pattern, &window.join("/"))? {
            return Ok(true);
        }
    }
    Ok(false)
}
