//! # Git Manager Library
//!
//! This library keeps track of a collection of git repositories declared in
//! a single, hand-editable configuration file. It is the engine behind the
//! `git-manager` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use git_manager::line::parse_lines;
//! use git_manager::tree::Tree;
//!
//! let mut tree = Tree::with_home("/home/me");
//! tree.set_lines(parse_lines("> code\n git@github.com:me/tool.git\n").unwrap());
//!
//! let repos = tree.repositories().unwrap();
//! assert_eq!(repos[0].path.to_str(), Some("/home/me/code/tool"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Lines (`line`)**: the line grammar. Every physical line is a comment,
//!   a root declaration, a base directory or a repository, and writes back
//!   exactly as it was read.
//! - **Tree (`tree`)**: resolves the lines into [`description::Description`]s
//!   (absolute directories and repositories) and inserts new entries at the
//!   structurally correct place, creating missing directory scopes.
//! - **Locators (`locator`)**: decomposes remote urls into host and path
//!   components for naming and filtering repositories.
//! - **Configuration file (`file`)**: reading, writing and locating the file
//!   on disk.
//! - **Git (`git`) and discovery (`finder`)**: handles for local clones and
//!   remotes, and a recursive search for existing clones.

pub mod description;
pub mod error;
pub mod file;
pub mod finder;
pub mod git;
pub mod line;
pub mod locator;
pub mod output;
pub mod path;
pub mod suggestions;
pub mod tree;

mod line_proptest;
