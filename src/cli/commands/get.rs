//! `passvault get`: print one field of an entry.

use crate::cli::{Cli, Context, Field};
use crate::errors::{PassVaultError, Result};

/// Execute the `get` command.
///
/// Prints the raw value to stdout with no decoration, so the output can
/// be piped into other tools.
pub fn execute(cli: &Cli, title: &str, field: Field) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (document, _master) = ctx.open()?;

    let entry = document
        .find_by_title(title)
        .ok_or_else(|| PassVaultError::NotFound(title.to_string()))?;

    let value = match field {
        Field::Password => entry.password.as_deref(),
        Field::User => entry.user.as_deref(),
        Field::Url => entry.url.as_deref(),
        Field::Notes => entry.notes.as_deref(),
    };

    match value {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(PassVaultError::CommandFailed(format!(
            "entry '{title}' has no {} set",
            field_name(field)
        ))),
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Password => "password",
        Field::User => "user name",
        Field::Url => "URL",
        Field::Notes => "notes",
    }
}
