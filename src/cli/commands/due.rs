//! `passvault due`: list entries whose password should be changed.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `due` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (document, _master) = ctx.open()?;

    let due = document.due_for_rotation(Utc::now());
    if due.is_empty() {
        output::success("No passwords are due for rotation.");
        return Ok(());
    }

    output::warning(&format!("{} password(s) due for rotation:", due.len()));
    output::print_due_table(&due);
    output::tip("Run `passvault edit <TITLE> --password` to change one.");
    Ok(())
}
