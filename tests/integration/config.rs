use crate::common::TestEnv;

#[test]
fn test_config_init_show_path() {
    let env = TestEnv::new();
    let path = env.config_path();

    env.run(&["config", "path"])
        .assert_success()
        .assert_stdout_contains(&path.display().to_string());

    env.run(&["config", "init"]).assert_success().assert_stdout_contains("Created global config");
    assert!(path.exists());

    env.run(&["config", "init"]).assert_success().assert_stdout_contains("already exists");

    env.run(&["config"]).assert_success().assert_stdout_contains("code_language = \"php\"");
}

#[test]
fn test_config_show_masks_token() {
    let env = TestEnv::new();
    env.write_config("github_token = \"ghp_abcdefghijklmnop\"");

    let out = env.run(&["config", "show"]);
    out.assert_success().assert_stdout_contains("ghp_***");
    assert!(!out.stdout.contains("abcdefghijklmnop"));
}

#[test]
fn test_cache_path_and_clear() {
    let env = TestEnv::new();
    env.write_config("");

    env.run(&["cache", "path"])
        .assert_success()
        .assert_stdout_contains(&env.cache_dir().display().to_string().replace('\\', "/"));

    std::fs::create_dir_all(env.cache_dir()).unwrap();
    std::fs::write(env.cache_dir().join("stale.json"), "{}").unwrap();
    env.run(&["cache", "clear"]).assert_success().assert_stdout_contains("Cleared cache");
    assert!(!env.cache_dir().exists());
}
