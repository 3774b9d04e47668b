//! `passvault add`: add a new entry to the vault.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_entry_password, Cli, Context, EntryFields};
use crate::config::Settings;
use crate::crypto::generator::{generate_password, GeneratorOptions};
use crate::errors::{PassVaultError, Result};
use crate::vault::document::validate_title;
use crate::vault::Entry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, title: &str, fields: &EntryFields) -> Result<()> {
    validate_title(title)?;
    let ctx = Context::load(cli)?;
    let (mut document, master) = ctx.open()?;

    // Fail before prompting for the entry password.
    if document.find_by_title(title).is_some() {
        return Err(PassVaultError::DuplicateTitle(title.to_string()));
    }

    let password = entry_password(&ctx.settings, title, fields.generate)?;
    let mut entry = apply_fields(Entry::new(title), fields);
    if !password.is_empty() {
        entry.set_password(Some(password.to_string()));
    }

    document.add(entry)?;
    ctx.save(&mut document, &master)?;

    output::success(&format!(
        "Entry '{title}' added ({} total)",
        document.len()
    ));
    if fields.generate {
        output::tip(&format!("Run `passvault get '{title}'` to print the generated password."));
    }

    Ok(())
}

/// Copy the optional field values onto `entry`, leaving unset ones alone.
pub(crate) fn apply_fields(mut entry: Entry, fields: &EntryFields) -> Entry {
    if let Some(url) = &fields.url {
        entry.url = non_empty(url);
    }
    if let Some(user) = &fields.user {
        entry.user = non_empty(user);
    }
    if let Some(notes) = &fields.notes {
        entry.notes = non_empty(notes);
    }
    if let Some(days) = fields.rotate_days {
        entry.change_password_in_days = days;
    }
    entry
}

/// Either generate a password or prompt for one.
pub(crate) fn entry_password(
    settings: &Settings,
    title: &str,
    generate: bool,
) -> Result<Zeroizing<String>> {
    if generate {
        let options = GeneratorOptions {
            length: settings.generator_length,
            ..GeneratorOptions::default()
        };
        generate_password(&options)
    } else {
        prompt_entry_password(title)
    }
}

/// An empty string on the command line clears the field.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
