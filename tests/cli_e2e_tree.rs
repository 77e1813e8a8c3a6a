//! End-to-end tests for the `git-manager tree` command.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

const CONFIG: &str = "\
# work projects
https://github.com/org/dotfiles.git
> code
  git@github.com:org/tool.git
  https://gitlab.com/other/lib.git library
  >> forks
     git@github.com:me/fork.git
";

#[test]
fn test_tree_shows_hierarchy() {
    let fixture = TestFixture::new().with_config(CONFIG);
    let home = fixture.home().display().to_string();

    fixture
        .command()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(home))
        .stdout(predicate::str::contains(
            "dotfiles (https://github.com/org/dotfiles.git)",
        ))
        .stdout(predicate::str::contains("code"))
        .stdout(predicate::str::contains("tool (git@github.com:org/tool.git)"))
        .stdout(predicate::str::contains(
            "library (https://gitlab.com/other/lib.git)",
        ))
        .stdout(predicate::str::contains("forks"))
        .stdout(predicate::str::contains("fork (git@github.com:me/fork.git)"));
}

#[test]
fn test_tree_depth_limits_output() {
    let fixture = TestFixture::new().with_config(CONFIG);

    fixture
        .command()
        .args(["tree", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code"))
        .stdout(predicate::str::contains("dotfiles"))
        .stdout(predicate::str::contains("tool").not())
        .stdout(predicate::str::contains("forks").not());
}

#[test]
fn test_tree_depth_zero_shows_root_only() {
    let fixture = TestFixture::new().with_config(CONFIG);

    fixture
        .command()
        .args(["tree", "--depth", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code").not());
}

#[test]
fn test_tree_honours_root_line() {
    let fixture = TestFixture::new().with_config("## /srv/git\n> mirrors\n  https://example.com/x/y.git\n");

    fixture
        .command()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/srv/git"))
        .stdout(predicate::str::contains("mirrors"))
        .stdout(predicate::str::contains("y (https://example.com/x/y.git)"));
}

#[test]
fn test_tree_of_empty_config() {
    let fixture = TestFixture::new().with_config("# nothing yet\n");
    let home = fixture.home().display().to_string();

    fixture
        .command()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(home));
}
