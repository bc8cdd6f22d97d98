//! Resolve the `Contributors` header.
//!
//! The default output is one line per contributor. `--json` prints an
//! object keyed by canonical identity, shaped like the plugin directory API:
//!
//! ```json
//! {
//!   "alice": {
//!     "display_name": "Alice Liddell",
//!     "profile": "https://github.com/alice",
//!     "avatar": "https://avatars.githubusercontent.com/u/101?v=4"
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::common::{CommandContext, SourceArgs};
use crate::contributors::ProfileMap;

/// Resolve every contributor to a profile.
#[derive(Args, Debug)]
pub struct ContributorsCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the resolved profiles as JSON
    #[arg(long)]
    json: bool,
}

impl ContributorsCommand {
    /// Load, resolve and print.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let parser = ctx.load_readme(&self.source, ctx.cache()?).await?;
        let profiles = parser.contributor_profiles().await;

        if self.json {
            println!("{}", to_json(&profiles)?);
        } else if profiles.is_empty() {
            println!("No contributors listed.");
        } else {
            for line in format_lines(&profiles) {
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn to_json(profiles: &ProfileMap) -> Result<String> {
    serde_json::to_string_pretty(profiles).context("Failed to serialize contributor profiles")
}

fn format_lines(profiles: &ProfileMap) -> Vec<String> {
    profiles
        .iter()
        .map(|(key, p)| {
            let profile = if p.profile_url.is_empty() {
                "(no profile)".dimmed().to_string()
            } else {
                p.profile_url.clone()
            };
            format!("{} {} {profile}", key.cyan(), p.display_name.bold())
        })
        .collect()
}
