//! Binary-level CLI tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn arkup() -> Command {
    Command::cargo_bin("arkup").unwrap()
}

#[test]
fn no_args_shows_usage() {
    arkup()
        .env_clear()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    arkup()
        .env_clear()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn upload_without_credentials_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    arkup()
        .env_clear()
        .current_dir(dir.path())
        .args(["upload", "manifest.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn upload_with_missing_manifest_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    arkup()
        .env_clear()
        .current_dir(dir.path())
        .env("ARKUP_ACCESS_KEY", "test-access")
        .env("ARKUP_SECRET_KEY", "test-secret")
        .args(["upload", "missing.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("manifest"));
}

#[test]
fn upload_rejects_manifest_without_file_column() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("manifest.csv");
    let mut f = std::fs::File::create(&manifest).unwrap();
    writeln!(f, "title,url").unwrap();
    writeln!(f, "A Trip,http://x/a.mp4").unwrap();

    arkup()
        .env_clear()
        .current_dir(dir.path())
        .env("ARKUP_ACCESS_KEY", "test-access")
        .env("ARKUP_SECRET_KEY", "test-secret")
        .args(["upload", "manifest.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file"));
}

#[test]
fn upload_with_empty_manifest_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("manifest.csv");
    let mut f = std::fs::File::create(&manifest).unwrap();
    writeln!(f, "file,title").unwrap();

    arkup()
        .env_clear()
        .current_dir(dir.path())
        .env("ARKUP_ACCESS_KEY", "test-access")
        .env("ARKUP_SECRET_KEY", "test-secret")
        .args(["upload", "manifest.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no rows"));
}
