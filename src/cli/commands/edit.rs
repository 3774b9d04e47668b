//! `passvault edit`: change fields of an existing entry.

use crate::cli::commands::add::{apply_fields, entry_password};
use crate::cli::output;
use crate::cli::{Cli, Context, EntryFields};
use crate::errors::{PassVaultError, Result};
use crate::vault::document::validate_title;

/// Execute the `edit` command.
///
/// Only the fields given on the command line change.  `--password`
/// prompts for a new password; `--generate` replaces it with a random one.
pub fn execute(
    cli: &Cli,
    title: &str,
    rename: Option<&str>,
    change_password: bool,
    fields: &EntryFields,
) -> Result<()> {
    if let Some(new_title) = rename {
        validate_title(new_title)?;
    }

    let ctx = Context::load(cli)?;
    let (mut document, master) = ctx.open()?;

    let current = document
        .find_by_title(title)
        .ok_or_else(|| PassVaultError::NotFound(title.to_string()))?
        .clone();

    let mut entry = apply_fields(current.clone(), fields);
    if let Some(new_title) = rename {
        entry.set_title(new_title);
    }
    if change_password || fields.generate {
        let password = entry_password(&ctx.settings, &entry.title, fields.generate)?;
        entry.set_password((!password.is_empty()).then(|| password.to_string()));
    }

    if entry == current {
        output::info("Nothing changed.");
        return Ok(());
    }

    let final_title = entry.title.clone();
    document.update(title, entry)?;
    ctx.save(&mut document, &master)?;

    output::success(&format!("Updated entry '{final_title}'"));
    Ok(())
}
