//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the resolved
//! configuration as a directory hierarchy: base directories as inner nodes,
//! repositories as leaves labelled with their source url.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use git_manager::description::Description;
use git_manager::path::{escapes, relative_to};
use git_manager::suggestions;

use super::Context;

/// Display the configured repositories as a tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root directory.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, ctx: &Context) -> Result<()> {
    let file = ctx.load()?;
    let descriptions = file
        .tree()
        .descriptions()
        .map_err(|e| suggestions::config_invalid(file.path(), e))?;

    let mut root = TreeNode::directory(file.tree().root(), None);
    for (_, description) in &descriptions {
        root.insert(description);
    }
    root.prune(args.depth.unwrap_or(usize::MAX));

    print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    /// Set for directories, which can have children.
    folder: Option<PathBuf>,
    children: Vec<TreeNode>,
}

/// How `path` is shown below `parent`.
fn display_name(path: &Path, parent: &Path) -> String {
    let relative = relative_to(path, parent);
    if escapes(&relative) || relative.as_os_str().is_empty() {
        path.display().to_string()
    } else {
        relative.display().to_string()
    }
}

impl TreeNode {
    fn directory(folder: PathBuf, parent: Option<&Path>) -> Self {
        let label = match parent {
            Some(parent) => display_name(&folder, parent),
            None => folder.display().to_string(),
        };
        Self {
            label,
            folder: Some(folder),
            children: Vec::new(),
        }
    }

    /// Adds a description below the deepest directory containing it.
    /// Descriptions arrive in file order, so the enclosing directory is
    /// always the most recently added matching one.
    fn insert(&mut self, description: &Description) {
        let path = description.path();
        let nested = self.children.iter_mut().rev().find(|child| {
            child
                .folder
                .as_deref()
                .is_some_and(|folder| path != folder && path.starts_with(folder))
        });
        if let Some(child) = nested {
            child.insert(description);
            return;
        }

        let parent = self.folder.clone().unwrap_or_default();
        let node = match description {
            Description::Base(base) => TreeNode::directory(base.folder.clone(), Some(&parent)),
            Description::Repository(repo) => TreeNode {
                label: format!("{} ({})", display_name(&repo.path, &parent), repo.source),
                folder: None,
                children: Vec::new(),
            },
        };
        self.children.push(node);
    }

    fn prune(&mut self, depth: usize) {
        if depth == 0 {
            self.children.clear();
        } else {
            for child in &mut self.children {
                child.prune(depth - 1);
            }
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _style: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
