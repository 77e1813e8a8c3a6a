//! Shared test utilities for the CLI end-to-end tests.
//!
//! Every fixture runs the binary against its own temporary directory with
//! `HOME`, `XDG_CONFIG_HOME` and `GIT_MANAGER_CONFIG` pointing inside it, so
//! tests never see the real user's configuration.
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_config("> code\n");
//! fixture.command().arg("tree").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, git_available};
    pub use super::TestFixture;
}

/// Whether a usable `git` executable is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// Run git in `dir` with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
}

/// A temporary home directory with an optional configuration file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty home directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("home")
            .create_dir_all()
            .expect("Failed to create home directory");
        Self { temp_dir }
    }

    /// Write the configuration file at its default location.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("xdg/.gitmanager/config")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The `HOME` seen by the binary.
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// The default configuration file location.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("xdg/.gitmanager/config")
    }

    /// Read the configuration file back.
    #[allow(dead_code)]
    pub fn config(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }

    /// Create a repository at `relative` below home with a commit and, if
    /// given, an `origin` remote.
    #[allow(dead_code)]
    pub fn repo(&self, relative: &str, origin: Option<&str>) -> PathBuf {
        let dir = self.home().join(relative);
        std::fs::create_dir_all(&dir).expect("Failed to create repository directory");
        git(&dir, &["init", "--quiet"]);
        git(&dir, &["commit", "--quiet", "--allow-empty", "-m", "init"]);
        if let Some(origin) = origin {
            git(&dir, &["remote", "add", "origin", origin]);
        }
        dir
    }

    /// Create a bare repository outside of home that can be cloned from.
    #[allow(dead_code)]
    pub fn upstream(&self, name: &str) -> PathBuf {
        let work = self.temp_dir.path().join("work").join(name);
        std::fs::create_dir_all(&work).expect("Failed to create work directory");
        git(&work, &["init", "--quiet"]);
        git(&work, &["commit", "--quiet", "--allow-empty", "-m", "init"]);

        let bare = self.temp_dir.path().join("upstream").join(format!("{name}.git"));
        git(
            self.temp_dir.path(),
            &["clone", "--quiet", "--bare", &work.to_string_lossy(), &bare.to_string_lossy()],
        );
        bare
    }

    /// A command for the binary running inside this fixture's home.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("git-manager");
        cmd.current_dir(self.home())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("NO_COLOR", "1")
            .env_remove("GIT_MANAGER_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
