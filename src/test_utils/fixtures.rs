//! Sample readmes and provider payloads.

/// The smallest complete readme: title, one header, short description, one section.
pub const MINIMAL_README: &str =
    "=== T ===\nVersion: 1.0\n\nShort desc.\n\n== Description ==\nBody text.\n";

/// A readme exercising most of the format.
pub const PLUGIN_README: &str = r"=== Sample Plugin ===
Plugin URI: https://example.com/sample
Contributors: alice@github, [Bob](mailto:bob@x.com), carol
Tags: Short Codes, readme, wp_cli.tools
Requires at least: 5.8
Tested up to: 6.4
Requires PHP: 7.4
Stable tag: 2.1.0
Version: 2.0.0
Author Name: Kevin
Author URI: https://example.com/kevin
License: GPLv3 or later
Donate link: https://example.com/donate

A *sample* plugin for exercising the parser.

== Description ==

Sample Plugin renders **readme** files.

= Features =

* Headers
* Sections

= Shortcodes =

Use `[readme]` anywhere.

== Installation ==

1. Upload the plugin.
2. Activate it.

== Frequently Asked Questions ==

= Does it work? =

Yes.

== Changelog ==

= 2.1.0 =
* Faster scanning.

= 2.0.0 =
* First release.

== Features ==

Top-level features section.
";

/// A readme whose headers sit inside a `<details>` element under a banner.
pub const DETAILS_README: &str = r"=== Wrapped ===
![Banner](https://example.com/banner.png)
<details><summary>Plugin info</summary>

Contributors: dana@example.com
Stable tag: 0.9
Author: [Dana](https://example.com/dana)
</details>

Headers are folded away.

== Usage ==

Just use it.
";

/// GitHub users API payload for `alice`.
pub const GITHUB_ALICE: &str = r#"{
  "login": "alice",
  "id": 101,
  "name": "Alice Liddell",
  "html_url": "https://github.com/alice",
  "avatar_url": "https://avatars.githubusercontent.com/u/101?v=4"
}"#;

/// Gravatar JSON profile for `bob@x.com`.
pub const GRAVATAR_BOB: &str = r#"{"entry":[{
  "id": "202",
  "hash": "ignored",
  "preferredUsername": "bobx",
  "displayName": "Robert X",
  "profileUrl": "https://gravatar.com/bobx",
  "thumbnailUrl": "https://0.gravatar.com/avatar/bobx"
}]}"#;

/// profiles.wordpress.org page for `carol`.
pub const WORDPRESS_CAROL: &str = r#"<!DOCTYPE html>
<html lang="en-US"><head>
<meta property="og:type" content="profile" />
<meta property="og:title" content="Carol Danvers (@carol) &#8211; WordPress user profile" />
<meta property="og:url" content="https://profiles.wordpress.org/carol/" />
<meta property="og:image" content="https://secure.gravatar.com/avatar/c4r01?s=200&#038;d=mm&#038;r=g" />
</head><body></body></html>"#;
