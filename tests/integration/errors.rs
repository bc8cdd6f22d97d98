use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn test_missing_file_exits_with_error() {
    let env = TestEnv::new();
    let missing = env.home().join("nope.txt").display().to_string();

    env.run(&["--no-cache", "show", "title", "--file", &missing])
        .assert_failure()
        .assert_stderr_contains("error: Unable to read readme source")
        .assert_stderr_contains("suggestion:");
}

#[test]
fn test_empty_file_is_unreadable() {
    let env = TestEnv::new();
    let readme = env.write_readme("empty.txt", "  \n");

    env.run(&["--no-cache", "show", "title", "--file", &readme])
        .assert_failure()
        .assert_stderr_contains("Unable to read readme source");
}

#[test]
fn test_source_is_required() {
    let env = TestEnv::new();
    env.run(&["--no-cache", "show", "title"])
        .assert_failure()
        .assert_stderr_contains("Invalid source locator");
}

#[test]
fn test_invalid_config_is_reported() {
    let env = TestEnv::new();
    std::fs::write(env.config_path(), "code_language = [").unwrap();
    let readme = env.write_readme("readme.txt", "=== T ===\n");

    env.run(&["show", "title", "--file", &readme])
        .assert_failure()
        .assert_stderr_contains("Configuration error");
}

#[test]
fn test_conflicting_sources_rejected_by_parser() {
    assert_cmd::Command::cargo_bin("wpreadme")
        .unwrap()
        .args(["show", "title", "--file", "a.txt", "--url", "https://example.com/readme.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
