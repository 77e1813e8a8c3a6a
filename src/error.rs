//! # Error Handling
//!
//! This module defines the centralized error type for `git-manager`. It uses
//! the `thiserror` library to create an `Error` enum covering every failure
//! the configuration engine and its git collaborator can report.
//!
//! The variants fall into four groups:
//!
//! - **Grammar errors**: a line of the configuration file matches none of the
//!   recognized shapes (`InvalidLine`, or `Grammar` once a line number is
//!   known).
//! - **Structural errors**: a base line skips a nesting level
//!   (`MissingSublevel`).
//! - **Lookup errors**: an insertion names a parent scope that does not exist,
//!   or a target that does not belong to that scope (`ParentNotFound`,
//!   `ScopeMismatch`, `PatternMismatch`), or a value that the line grammar
//!   cannot hold (`UnwritableField`).
//! - **Environment errors**: I/O failures, glob pattern errors and failures
//!   to run the `git` executable.
//!
//! None of these are swallowed inside the library; they propagate to the
//! caller, which decides whether to abort or recover.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for git-manager operations
#[derive(Error, Debug)]
pub enum Error {
    /// A single line does not match any known line shape.
    #[error("Input does not represent a configuration line: {content:?}")]
    InvalidLine { content: String },

    /// A line of a configuration file does not match any known line shape.
    #[error("Configuration parsing error in line {line}: {content:?}")]
    Grammar { line: usize, content: String },

    /// A base line is nested more than one level below the current scope.
    #[error("Error in line {line}: Missing base sublevel")]
    MissingSublevel { line: usize },

    /// The parent scope of an insertion does not resolve in the tree.
    #[error("Parent does not exist: {}", parent.display())]
    ParentNotFound { parent: PathBuf },

    /// The item to insert does not live directly inside the given scope.
    #[error("{} is not a direct child of {}", path.display(), scope.display())]
    ScopeMismatch { path: PathBuf, scope: PathBuf },

    /// The repository url can not be expressed with the scope's url pattern.
    #[error("Repository url {url} does not fit pattern {pattern}")]
    PatternMismatch { url: String, pattern: String },

    /// A value would read back differently once written into a line.
    #[error("Cannot write {field} {value:?} into a configuration line")]
    UnwritableField { field: &'static str, value: String },

    /// The git executable could not be run, or failed to produce a result.
    #[error("Git command failed in {}: {command} - {stderr}", cwd.display())]
    GitCommand {
        command: String,
        cwd: PathBuf,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_grammar() {
        let error = Error::Grammar {
            line: 3,
            content: "a b c".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("line 3"));
        assert!(display.contains("a b c"));
    }

    #[test]
    fn test_error_display_missing_sublevel() {
        let error = Error::MissingSublevel { line: 7 };
        assert_eq!(error.to_string(), "Error in line 7: Missing base sublevel");
    }

    #[test]
    fn test_error_display_scope_mismatch() {
        let error = Error::ScopeMismatch {
            path: PathBuf::from("/home/me/weird/repo"),
            scope: PathBuf::from("/home/me/code"),
        };
        let display = format!("{}", error);
        assert!(display.contains("/home/me/weird/repo"));
        assert!(display.contains("/home/me/code"));
    }

    #[test]
    fn test_error_display_unwritable_field() {
        let error = Error::UnwritableField {
            field: "path",
            value: "My Projects".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot write path \"My Projects\" into a configuration line"
        );
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "rev-parse HEAD".to_string(),
            cwd: PathBuf::from("/tmp/repo"),
            stderr: "not a git repository".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git command failed"));
        assert!(display.contains("rev-parse HEAD"));
        assert!(display.contains("not a git repository"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_glob_error() {
        let glob_error = glob::Pattern::new("[unclosed").unwrap_err();
        let error: Error = glob_error.into();
        assert!(error.to_string().contains("Glob pattern error"));
    }
}
