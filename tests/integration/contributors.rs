use predicates::prelude::*;

use crate::common::TestEnv;

const README: &str = "=== People ===
Contributors: [Jo Bloggs](https://example.com/jo), [Ann](https://example.org/ann), [Jo Bloggs](https://example.net/other)

Short.
";

#[test]
fn test_contributors_json() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", README);

    let out = env.run(&["--no-cache", "contributors", "--file", &readme, "--json"]);
    out.assert_success();

    let value: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 2);
    assert!(out.stdout.find("\"jobloggs\"") < out.stdout.find("\"ann\""));
    assert_eq!(value["jobloggs"]["display_name"], "Jo Bloggs");
    assert_eq!(value["jobloggs"]["profile"], "https://example.com/jo");
    assert!(value["ann"]["avatar"].as_str().unwrap().starts_with("https://"));
}

#[test]
fn test_contributors_plain() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", README);

    let out = env.run(&["--no-cache", "contributors", "--file", &readme]);
    out.assert_success()
        .assert_stdout_contains("jobloggs Jo Bloggs https://example.com/jo")
        .assert_stdout_contains("ann Ann https://example.org/ann");
    assert_eq!(out.stdout.lines().count(), 2);
}

#[test]
fn test_no_contributors() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", "=== Alone ===\nStable tag: 1.0\n");

    assert_cmd::Command::cargo_bin("wpreadme")
        .unwrap()
        .env("HOME", env.home())
        .args(["--no-cache", "--config"])
        .arg(env.config_path())
        .args(["contributors", "--file", &readme])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contributors listed."));
}
