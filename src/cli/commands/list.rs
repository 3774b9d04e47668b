//! `passvault list`: show a table of entries (never their passwords).

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (document, _master) = ctx.open()?;

    let entries = match search {
        Some(criteria) => document.search(criteria),
        None => document.entries().iter().collect(),
    };

    if search.is_some() && entries.is_empty() {
        output::info("No entries match.");
        return Ok(());
    }

    output::print_entries_table(&entries);
    Ok(())
}
