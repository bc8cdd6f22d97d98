//! Print one or more readme segments.
//!
//! # Examples
//!
//! ```bash
//! wpreadme show title,version --wpsvn my-plugin/trunk/readme.txt
//! wpreadme show "Description/Features" --file ./readme.txt --lang php
//! wpreadme show "Requires at least,Tested up to" --github owner/repo/main/readme.txt --raw
//! wpreadme show changelog --file ./readme.txt --translate "Changelog=History"
//! ```

use anyhow::Result;
use clap::Args;
use std::time::Duration;

use super::common::{CommandContext, SourceArgs};
use crate::invocation::{Invocation, RenderRequest};

/// Print the requested segments, concatenated in order.
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Comma-separated segment names (`title`, `version`, `Changelog`, `Description/Features`, ...)
    segments: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Render markdown for views that are raw by default
    #[arg(long, conflicts_with = "raw")]
    parse: bool,

    /// Skip markdown rendering for views that are rendered by default
    #[arg(long)]
    raw: bool,

    /// Translation entries (`From=To`, separated by `,` `;` or `|`; `none` resets)
    #[arg(long, value_name = "TABLE")]
    translate: Option<String>,

    /// Default code language for unlabelled code blocks (`none` disables)
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Response cache lifetime in seconds (at least 60)
    #[arg(long, value_name = "SECONDS")]
    ttl: Option<u64>,
}

impl ShowCommand {
    /// Render and print.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let cache = ctx.cache()?;
        let parser = ctx.parser(cache.clone(), self.source.token.as_deref())?;
        let mut invocation =
            Invocation::new(parser, cache).with_response_ttl(ctx.config.cache.response_ttl());

        let output = invocation.render(&self.request(ctx)?).await?;
        println!("{output}");
        Ok(())
    }

    fn request(&self, ctx: &CommandContext) -> Result<RenderRequest> {
        Ok(RenderRequest {
            source: Some(self.source.locator(&ctx.config)?),
            segments: self.segments.clone(),
            parse: self.parse_flag(),
            translate: self.translate.clone(),
            lang: self.lang.clone(),
            ttl: self.ttl.map(Duration::from_secs),
        })
    }

    fn parse_flag(&self) -> Option<bool> {
        match (self.parse, self.raw) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
