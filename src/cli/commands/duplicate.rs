//! `passvault duplicate`: copy an entry under a new title.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::vault::document::validate_title;

/// Execute the `duplicate` command.
pub fn execute(cli: &Cli, title: &str, new_title: &str) -> Result<()> {
    validate_title(new_title)?;
    let ctx = Context::load(cli)?;
    let (mut document, master) = ctx.open()?;

    document.duplicate(title, new_title)?;
    ctx.save(&mut document, &master)?;

    output::success(&format!("Copied '{title}' to '{new_title}'"));
    Ok(())
}
