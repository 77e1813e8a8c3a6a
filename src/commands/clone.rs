//! # Clone Command Implementation
//!
//! Clones a single repository into the directory derived from its url,
//! `<root>/<host>/<path components>`, and optionally records it in the
//! configuration file.
//!
//! ```bash
//! git-manager clone --save git@github.com:org/tool.git -- --depth 1
//! ```

use anyhow::{bail, Result};
use clap::Args;
use log::info;
use std::path::Path;

use git_manager::description::RepositoryDescription;
use git_manager::git::{OutputMode, RemoteRepository};

use super::Context;

/// Clone a repository into its canonical location
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Add the repository to the configuration file after cloning
    #[arg(long)]
    pub save: bool,

    /// Url of the repository to clone
    pub url: String,

    /// Extra arguments for `git clone`
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Where `url` is cloned to below `root`.
pub fn url_to_description(url: &str, root: &Path) -> RepositoryDescription {
    let remote = RemoteRepository::new(url);
    let mut path = root.to_path_buf();
    path.extend(remote.components());
    RepositoryDescription::new(url, path)
}

/// Execute the `clone` command.
pub fn execute(args: CloneArgs, ctx: &Context) -> Result<()> {
    let mut file = ctx.load()?;
    let desc = url_to_description(&args.url, &file.tree().root());
    let local = desc.local();

    if local.exists() {
        eprintln!("Repository already exists at {}, nothing to clone.", local);
        return Ok(());
    }

    if !desc.remote().clone_into(&local, &args.args, OutputMode::Inherit)? {
        bail!("git clone {} failed", args.url);
    }

    if args.save {
        file.tree_mut().insert_repo_or_get(&desc)?;
        file.write()?;
        info!("saved {} to {}", desc.source, file.path().display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_url_to_description() {
        let desc = url_to_description("git@github.com:org/tool.git", Path::new("/home/me"));
        assert_eq!(desc.source, "git@github.com:org/tool.git");
        assert_eq!(desc.path, PathBuf::from("/home/me/github.com/org/tool"));

        let desc = url_to_description("https://alice@example.com/x/y/", Path::new("/srv"));
        assert_eq!(desc.path, PathBuf::from("/srv/example.com/alice/x/y"));
    }
}
