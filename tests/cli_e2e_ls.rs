//! End-to-end tests for the `git-manager ls` command.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

#[test]
fn test_ls_without_clones_prints_nothing() {
    let fixture =
        TestFixture::new().with_config("> code\n  https://example.com/org/tool.git\n");

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_ls_lists_local_clones_in_file_order() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new().with_config(
        "> code\n  https://example.com/org/tool.git\n  https://example.com/org/missing.git\n\
         > other\n  https://example.com/org/lib.git\n",
    );
    let tool = fixture.repo("code/tool", None);
    let lib = fixture.repo("other/lib", None);

    let expected = format!("{}\n{}\n", tool.display(), lib.display());
    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn test_ls_filters_by_pattern() {
    if !git_available() {
        return;
    }
    let fixture = TestFixture::new().with_config(
        "> code\n  https://example.com/org/tool.git\n  https://example.com/other/lib.git\n",
    );
    fixture.repo("code/tool", None);
    let lib = fixture.repo("code/lib", None);

    fixture
        .command()
        .args(["ls", "other/*"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", lib.display())));
}

#[test]
fn test_ls_without_match_suggests_name() {
    let fixture = TestFixture::new()
        .with_config("> code\n  https://example.com/org/tool.git\n");

    fixture
        .command()
        .args(["ls", "tols"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repository matches tols"))
        .stderr(predicate::str::contains("Did you mean 'tool'?"));
}

#[test]
fn test_ls_invalid_glob() {
    let fixture = TestFixture::new()
        .with_config("> code\n  https://example.com/org/tool.git\n");

    fixture
        .command()
        .args(["ls", "[org"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern"));
}
