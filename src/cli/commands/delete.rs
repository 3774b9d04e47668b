//! `passvault delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, title: &str, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(PassVaultError::UserCancelled);
        }
    }

    let (mut document, master) = ctx.open()?;
    document.remove(title)?;
    ctx.save(&mut document, &master)?;

    output::success(&format!("Deleted entry '{title}'"));

    Ok(())
}
