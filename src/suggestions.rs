//! # Error Suggestions
//!
//! Constructors for user-facing errors that say what went wrong and how to
//! fix it. The command layer returns these instead of bare messages.
//!
//! ```rust,ignore
//! use git_manager::suggestions;
//!
//! let path = ConfigFile::find().ok_or_else(|| suggestions::config_not_found(None))?;
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for a missing configuration file.
///
/// `path` is the explicitly requested file, if any.
pub fn config_not_found(path: Option<&Path>) -> anyhow::Error {
    let what = match path {
        Some(path) => format!("Configuration file not found: {}", path.display()),
        None => "No configuration file found".to_string(),
    };
    anyhow::anyhow!(
        "{what}\n\n\
         hint: Run 'git-manager reconfigure PATH' to create one from existing repositories\n\
         hint: Use --config to specify a different path\n\
         hint: Set the GIT_MANAGER_CONFIG environment variable\n\
         hint: Default locations are $XDG_CONFIG_HOME/.gitmanager/config and ~/.gitmanager"
    )
}

/// Generate an error for a configuration file that could not be read.
pub fn config_invalid(path: &Path, error: Error) -> anyhow::Error {
    let hint = match error {
        Error::Grammar { .. } => {
            "hint: Every line must be a comment, '## ROOT', '> PATH [PATTERN]' or 'URL [PATH]'"
        }
        Error::MissingSublevel { .. } => {
            "hint: A line starting with N+1 '>' must follow a line starting with N '>'"
        }
        _ => "hint: Check that the file is readable",
    };
    anyhow::anyhow!(
        "Failed to load configuration from {path}\n\
         error: {error}\n\n\
         {hint}",
        path = path.display()
    )
}

/// Generate an error for an invalid glob pattern.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Use * and ? as wildcards within a single url component\n\
         hint: Use [abc] for character classes, [!abc] to negate\n\
         hint: Separate components with '/', e.g. 'org/*' or 'example.com:org/repo'"
    )
}

/// Generate an error for repository filters that matched nothing.
///
/// Suggests the closest repository name for a single-word pattern.
pub fn no_matching_repositories(patterns: &[String], names: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
    let did_you_mean = match patterns {
        [single] => find_similar(single, &candidates)
            .map(|s| format!("\nhint: Did you mean '{s}'?"))
            .unwrap_or_default(),
        _ => String::new(),
    };

    anyhow::anyhow!(
        "No repository matches {patterns}{did_you_mean}\n\n\
         hint: Patterns match trailing url components, e.g. 'org/repo' or 'repo'\n\
         hint: Run 'git-manager tree' to list all configured repositories",
        patterns = patterns.join(", ")
    )
}

/// Find the candidate closest to `input` within an edit distance of 2.
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (candidate, edit_distance(input, candidate)))
        .filter(|&(_, distance)| distance <= 2 && distance < input.len())
        .min_by_key(|&(_, distance)| distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, computed one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }

    previous[b.len()]
}
