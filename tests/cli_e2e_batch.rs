//! End-to-end tests for the commands that run over every repository:
//! `setup`, `fetch`, `pull`, `push`, `gc`, `status`, `state` and `clone`.
//!
//! Upstreams are bare repositories inside the fixture, cloned over the
//! `file://` protocol, so no network access is needed.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

use std::path::Path;

fn url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// A fixture whose configuration lists one upstream under `code/tool`.
fn with_upstream() -> (TestFixture, String) {
    let fixture = TestFixture::new();
    let upstream = url(&fixture.upstream("tool"));
    let fixture = fixture.with_config(&format!("> code\n  {upstream} tool\n"));
    (fixture, upstream)
}

#[test]
fn test_setup_clones_missing_repositories() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();

    fixture
        .command()
        .arg("setup")
        .assert()
        .success()
        .stderr(predicate::str::contains("1/1 repositories ok"));

    assert!(fixture.home().join("code/tool/.git").is_dir());

    // a second run finds the clone in place
    fixture
        .command()
        .arg("setup")
        .assert()
        .success()
        .stderr(predicate::str::contains("1/1 repositories ok"));
}

#[test]
fn test_setup_reports_failures() {
    if !git_available() {
        return;
    }
    let (fixture, upstream) = with_upstream();
    let missing = url(&fixture.path().join("upstream/missing.git"));
    let fixture = fixture.with_config(&format!(
        "> code\n  {upstream} tool\n  {missing} missing\n"
    ));

    fixture
        .command()
        .arg("setup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1/2 repositories ok"))
        .stderr(predicate::str::contains("1 of 2 repositories failed"));

    assert!(fixture.home().join("code/tool/.git").is_dir());
    assert!(!fixture.home().join("code/missing").exists());
}

#[test]
fn test_parallel_setup() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new();
    let a = url(&fixture.upstream("a"));
    let b = url(&fixture.upstream("b"));
    let fixture = fixture.with_config(&format!("> code\n  {a} a\n  {b} b\n"));

    fixture
        .command()
        .args(["setup", "--jobs", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2/2 repositories ok"));

    assert!(fixture.home().join("code/a/.git").is_dir());
    assert!(fixture.home().join("code/b/.git").is_dir());
}

#[test]
fn test_commands_on_fresh_clone_succeed() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();
    fixture.command().arg("setup").assert().success();

    for command in ["fetch", "pull", "state", "status", "gc"] {
        fixture
            .command()
            .arg(command)
            .assert()
            .success()
            .stderr(predicate::str::contains("1/1 repositories ok"));
    }
}

#[test]
fn test_commands_skip_missing_clones() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();

    fixture
        .command()
        .arg("fetch")
        .assert()
        .success()
        .stderr(predicate::str::contains("0/0 repositories ok"));
}

#[test]
fn test_status_reports_uncommitted_changes() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();
    fixture.command().arg("setup").assert().success();
    std::fs::write(fixture.home().join("code/tool/new.txt"), "change").unwrap();

    fixture
        .command()
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("code/tool"))
        .stdout(predicate::str::contains("new.txt"))
        .stderr(predicate::str::contains("0/1 repositories ok"));
}

#[test]
fn test_state_reports_local_commits() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();
    fixture.command().arg("setup").assert().success();
    git(
        &fixture.home().join("code/tool"),
        &["commit", "--quiet", "--allow-empty", "-m", "local"],
    );

    fixture
        .command()
        .arg("state")
        .assert()
        .failure()
        .stdout(predicate::str::contains("push required"));

    fixture.command().arg("push").assert().success();
    fixture.command().arg("state").assert().success();
}

#[test]
fn test_state_reports_upstream_commits() {
    if !git_available() {
        return;
    }
    let (fixture, _) = with_upstream();
    fixture.command().arg("setup").assert().success();

    let other = fixture.path().join("other");
    git(
        fixture.path(),
        &["clone", "--quiet", &url(&fixture.path().join("upstream/tool.git")), "other"],
    );
    git(&other, &["commit", "--quiet", "--allow-empty", "-m", "remote"]);
    git(&other, &["push", "--quiet"]);

    fixture.command().arg("fetch").assert().success();
    fixture
        .command()
        .arg("state")
        .assert()
        .failure()
        .stdout(predicate::str::contains("pull required"));
}

#[test]
fn test_clone_save_records_repository() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new().with_config("# mine\n");
    let bare = fixture.upstream("tool");
    let upstream = url(&bare);

    fixture
        .command()
        .args(["clone", "--save", &upstream])
        .assert()
        .success();

    let relative = bare
        .with_extension("")
        .strip_prefix("/")
        .unwrap()
        .to_path_buf();
    assert!(fixture.home().join(&relative).join(".git").is_dir());
    assert!(fixture.config().contains(&upstream));

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            fixture.home().join(&relative).display().to_string(),
        ));
}

#[test]
fn test_clone_without_save_leaves_config() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new().with_config("# mine\n");
    let upstream = url(&fixture.upstream("tool"));

    fixture.command().args(["clone", &upstream]).assert().success();
    assert_eq!(fixture.config(), "# mine\n");
}
