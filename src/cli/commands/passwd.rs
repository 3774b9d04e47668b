//! `passvault passwd`: change the vault's master password.
//!
//! Re-encrypts the whole vault under a key derived from the new password
//! and a fresh salt.  The old file stays intact until the new one has
//! been fully written.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context, NEW_PASSWORD_ENV};
use crate::errors::Result;

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    // 1. Open the vault with the current password.
    let (mut document, _old) = ctx.open()?;

    // 2. Prompt for the new password.
    output::info("Choose a new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV, ctx.settings.min_password_len)?;

    // 3. Stage the new key, then write under it.
    ctx.store
        .change_master_password(&mut document, new_password.as_bytes())?;
    ctx.save(&mut document, &new_password)?;

    output::success("Master password changed.");
    output::tip("Use the new password from now on; the old one no longer opens this vault.");

    Ok(())
}
