use wpreadme_cli::test_utils::fixtures;

use crate::common::TestEnv;

#[test]
fn test_show_segments_in_order() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::MINIMAL_README);

    env.run(&["--no-cache", "show", "title,version,Description", "--file", &readme])
        .assert_success()
        .assert_stdout_contains("T1.0<p>Body text.</p>");
}

#[test]
fn test_show_missing_segment_placeholder() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::MINIMAL_README);

    env.run(&["--no-cache", "show", "title, Other Notes", "--file", &readme])
        .assert_success()
        .assert_stdout_contains("T<em>Other Notes not found</em>");
}

#[test]
fn test_show_subsection_with_code_language() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::PLUGIN_README);

    env.run(&[
        "--no-cache",
        "show",
        "Description/Shortcodes",
        "--file",
        &readme,
        "--lang",
        "PHP",
    ])
    .assert_success()
    .assert_stdout_contains("<code class='language-php'>[readme]</code>");
}

#[test]
fn test_show_raw_and_parsed_sections() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::PLUGIN_README);

    env.run(&["--no-cache", "show", "Changelog", "--file", &readme])
        .assert_success()
        .assert_stdout_contains("<h4>2.1.0</h4>");

    env.run(&["--no-cache", "show", "Changelog", "--file", &readme, "--raw"])
        .assert_success()
        .assert_stdout_contains("= 2.1.0 =\n* Faster scanning.");
}

#[test]
fn test_show_dynamic_header_names() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::PLUGIN_README);

    env.run(&["--no-cache", "show", "getRequiresAtLeast,title,TestedUpTo", "--file", &readme])
        .assert_success()
        .assert_stdout_contains("5.8Sample Plugin6.4");
}

#[test]
fn test_show_translation_in_sections() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", fixtures::PLUGIN_README);

    env.run(&[
        "--no-cache",
        "show",
        "all sections",
        "--file",
        &readme,
        "--translate",
        "Changelog=History",
    ])
    .assert_success()
    .assert_stdout_contains("<summary>History</summary>")
    .assert_stdout_contains("<nav id='readme-nav' class='readme'>");
}

#[test]
fn test_edited_file_is_not_served_from_cache() {
    let env = TestEnv::new();
    env.write_config("");
    let readme = env.write_readme("readme.txt", fixtures::MINIMAL_README);

    env.run(&["show", "title", "--file", &readme]).assert_success().assert_stdout_contains("T");
    assert!(std::fs::read_dir(env.cache_dir()).map(|d| d.count() > 0).unwrap_or(false));

    env.write_readme("readme.txt", "=== Renamed ===\nVersion: 2.0\n");
    let fresh = env.run(&["show", "title", "--file", &readme]);
    fresh.assert_success();
    assert_eq!(fresh.stdout.trim(), "Renamed");

    env.run(&["cache", "clear"]).assert_success();
    assert!(!env.cache_dir().exists());
}

#[test]
fn test_configured_code_language_and_translations() {
    let env = TestEnv::new();
    env.write_config("code_language = \"js\"\n\n[translations]\n\"Installation\" = \"Setup\"\n");
    let readme = env.write_readme("readme.txt", fixtures::PLUGIN_README);

    env.run(&["--no-cache", "show", "all sections,Description/Shortcodes", "--file", &readme])
        .assert_success()
        .assert_stdout_contains("<summary>Setup</summary>")
        .assert_stdout_contains("<code class='language-js'>");
}
