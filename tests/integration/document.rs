use crate::common::TestEnv;

const README: &str = "=== Linked ===
Contributors: [Jo Bloggs](https://example.com/jo)
Stable tag: 3.0

Everything in one page.

== Usage ==

Run it.

== FAQ ==

= Why? =

Because.
";

#[test]
fn test_document_with_tags() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", README);

    let out = env.run(&["--no-cache", "document", "--file", &readme]);
    out.assert_success()
        .assert_stdout_contains("<p id='readme-short' class='readme'>Everything in one page.</p>")
        .assert_stdout_contains("<summary>Document Header</summary>")
        .assert_stdout_contains(
            "<span class='readme-head-value'><a href=\"https://example.com/jo\">Jo Bloggs</a></span>",
        )
        .assert_stdout_contains(
            "<details id='readme-usage' class='readme' open><summary>Usage</summary><p>Run it.</p></details>",
        )
        .assert_stdout_contains("<a href='#readme-faq' class='readme' title='FAQ'>FAQ</a>");
    assert!(out.stdout.starts_with("<a id='readme-top'></a>"));
}

#[test]
fn test_document_without_tags() {
    let env = TestEnv::new();
    let readme = env.write_readme("readme.txt", README);

    let out = env.run(&["--no-cache", "document", "--file", &readme, "--no-tags"]);
    out.assert_success()
        .assert_stdout_contains("<h3 class='readme'>Usage</h3><p>Run it.</p>")
        .assert_stdout_contains("<h3 class='readme'>FAQ</h3><h4>Why?</h4>");
    assert!(!out.stdout.contains("readme-nav"));
}
