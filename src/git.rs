//! Handles onto local clones and remote repositories.
//!
//! Everything here shells out to the system `git` executable, which
//! automatically picks up:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any configuration in ~/.gitconfig
//!
//! Operations that only report success return `Ok(bool)`; an `Err` means
//! the executable itself could not be run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::locator;

/// How a git invocation treats the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Share stdin, stdout and stderr with the current process.
    Inherit,
    /// Capture all output; failures are logged instead of shown.
    Capture,
}

/// Relation between a local branch and its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    UpToDate,
    /// Upstream has commits the local branch lacks; pull required.
    RemoteNewer,
    /// The local branch has commits upstream lacks; push required.
    LocalNewer,
    /// Both sides have commits the other lacks.
    Divergence,
    /// The current branch does not track anything.
    NoUpstream,
}

fn git(cwd: Option<&Path>, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

fn spawn_error(cwd: Option<&Path>, args: &[&str], e: std::io::Error) -> Error {
    Error::GitCommand {
        command: args.join(" "),
        cwd: cwd.map(Path::to_path_buf).unwrap_or_default(),
        stderr: e.to_string(),
    }
}

/// Run git and collect its output.
fn output(cwd: Option<&Path>, args: &[&str]) -> Result<Output> {
    debug!("git {} (in {:?})", args.join(" "), cwd);
    git(cwd, args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(cwd, args, e))
}

/// Run git and report whether it succeeded.
fn succeeds(cwd: Option<&Path>, args: &[&str], mode: OutputMode) -> Result<bool> {
    match mode {
        OutputMode::Inherit => {
            debug!("git {} (in {:?})", args.join(" "), cwd);
            let status = git(cwd, args)
                .status()
                .map_err(|e| spawn_error(cwd, args, e))?;
            Ok(status.success())
        }
        OutputMode::Capture => {
            let out = output(cwd, args)?;
            if !out.status.success() {
                warn!(
                    "git {} failed: {}",
                    args.join(" "),
                    String::from_utf8_lossy(&out.stderr).trim()
                );
            }
            Ok(out.status.success())
        }
    }
}

/// Run git and return the first line of its stdout, or `None` on failure.
fn first_line(cwd: Option<&Path>, args: &[&str]) -> Result<Option<String>> {
    let out = output(cwd, args)?;
    if !out.status.success() {
        return Ok(None);
    }
    let stdout = String::from_utf8_lossy(&out.stdout);
    Ok(Some(stdout.lines().next().unwrap_or("").trim().to_string()))
}

/// A local clone, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalRepository {
    path: PathBuf,
}

impl LocalRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks that the path is the top level of a git work tree.
    pub fn exists(&self) -> bool {
        if !self.path.is_dir() {
            return false;
        }
        match first_line(Some(&self.path), &["rev-parse", "--show-cdup"]) {
            Ok(Some(cdup)) => cdup.is_empty(),
            Ok(None) => false,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Fetches all remotes.
    pub fn fetch(&self, mode: OutputMode) -> Result<bool> {
        succeeds(Some(&self.path), &["fetch", "--all", "--quiet"], mode)
    }

    pub fn pull(&self, mode: OutputMode) -> Result<bool> {
        succeeds(Some(&self.path), &["pull"], mode)
    }

    pub fn push(&self, mode: OutputMode) -> Result<bool> {
        succeeds(Some(&self.path), &["push"], mode)
    }

    /// Runs `git gc` with extra arguments.
    pub fn gc(&self, args: &[String], mode: OutputMode) -> Result<bool> {
        let mut full = vec!["gc"];
        full.extend(args.iter().map(String::as_str));
        succeeds(Some(&self.path), &full, mode)
    }

    /// Porcelain status output, empty for a clean work tree. `None` if the
    /// repository does not exist.
    pub fn local_status(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Ok(None);
        }
        let out = output(Some(&self.path), &["status", "--porcelain"])?;
        if !out.status.success() {
            return Err(Error::GitCommand {
                command: "status --porcelain".to_string(),
                cwd: self.path.clone(),
                stderr: String::from_utf8_lossy(&out.stderr).to_string(),
            });
        }
        Ok(Some(String::from_utf8_lossy(&out.stdout).to_string()))
    }

    /// Shows the full, human-readable `git status` on the terminal.
    pub fn print_status(&self) -> Result<bool> {
        succeeds(Some(&self.path), &["status"], OutputMode::Inherit)
    }

    /// Compares HEAD against its upstream. `None` if the repository does
    /// not exist.
    pub fn remote_status(&self) -> Result<Option<RemoteStatus>> {
        if !self.exists() {
            return Ok(None);
        }

        let cwd = Some(self.path.as_path());
        let local = first_line(cwd, &["rev-parse", "HEAD"])?.unwrap_or_default();
        let head = first_line(cwd, &["symbolic-ref", "-q", "HEAD"])?.unwrap_or_default();
        if head.is_empty() {
            return Ok(Some(RemoteStatus::NoUpstream));
        }

        let upstream = first_line(cwd, &["for-each-ref", "--format=%(upstream:short)", &head])?
            .unwrap_or_default();
        if upstream.is_empty() {
            return Ok(Some(RemoteStatus::NoUpstream));
        }

        let remote = first_line(cwd, &["rev-parse", &upstream])?.unwrap_or_default();
        let base = first_line(cwd, &["merge-base", &local, &remote])?.unwrap_or_default();

        let status = if local == remote {
            RemoteStatus::UpToDate
        } else if local == base {
            RemoteStatus::RemoteNewer
        } else if remote == base {
            RemoteStatus::LocalNewer
        } else {
            RemoteStatus::Divergence
        };
        Ok(Some(status))
    }

    /// Names of all configured remotes.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let out = output(Some(&self.path), &["remote"])?;
        Ok(String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Url of the named remote, if it is configured.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        Ok(first_line(Some(&self.path), &["remote", "get-url", name])?
            .filter(|url| !url.is_empty()))
    }
}

impl fmt::Display for LocalRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// A remote repository, identified by its url.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteRepository {
    url: String,
}

impl RemoteRepository {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Checks that the remote answers `ls-remote`.
    pub fn exists(&self) -> Result<bool> {
        succeeds(
            None,
            &["ls-remote", "--exit-code", "--", &self.url],
            OutputMode::Capture,
        )
    }

    /// Clones into the path of `local`, creating parent directories first.
    pub fn clone_into(
        &self,
        local: &LocalRepository,
        extra_args: &[String],
        mode: OutputMode,
    ) -> Result<bool> {
        if let Some(parent) = local.path().parent() {
            fs::create_dir_all(parent)?;
        }

        let target = local.path().to_string_lossy();
        succeeds(None, &clone_args(&self.url, &target, extra_args), mode)
    }

    pub fn components(&self) -> Vec<String> {
        locator::components(&self.url)
    }

    pub fn humanish_part(&self) -> String {
        locator::humanish_part(&self.url)
    }

    pub fn matches(&self, pattern: &str) -> Result<bool> {
        locator::matches(&self.url, pattern)
    }
}

/// `git clone` arguments; the url and target follow `--` so that neither
/// is read as an option.
fn clone_args<'a>(url: &'a str, target: &'a str, extra_args: &'a [String]) -> Vec<&'a str> {
    let mut args = vec!["clone"];
    args.extend(extra_args.iter().map(String::as_str));
    args.extend(["--", url, target]);
    args
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
