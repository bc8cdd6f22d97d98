//! Print a complete readme as HTML.

use anyhow::Result;
use clap::Args;

use super::common::{CommandContext, SourceArgs};

/// Render the whole document: banner, short description, headers and sections.
#[derive(Args, Debug)]
pub struct DocumentCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Render sections as plain headings instead of `<details>` blocks with navigation
    #[arg(long)]
    no_tags: bool,
}

impl DocumentCommand {
    /// Load, render and print.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let parser = ctx.load_readme(&self.source, ctx.cache()?).await?;
        println!("{}", parser.document(!self.no_tags).await);
        Ok(())
    }
}
