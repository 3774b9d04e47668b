//! `passvault init`: create a new, empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{ensure_absent, prompt_new_password, Cli, Context, PASSWORD_ENV};
use crate::errors::Result;
use crate::vault::new_document;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    // 1. Refuse to overwrite an existing vault.
    ensure_absent(&ctx.path)?;

    // 2. Create the parent directory if needed.
    if let Some(parent) = ctx.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            output::info(&format!("Created directory: {}", parent.display()));
        }
    }

    // 3. Prompt for a new password (with confirmation).
    let password = prompt_new_password(PASSWORD_ENV, ctx.settings.min_password_len)?;

    // 4. Write an empty vault.
    let mut document = new_document();
    ctx.save(&mut document, &password)?;

    output::success(&format!("Vault created at {}", ctx.path.display()));
    output::tip("Run `passvault add <TITLE>` to add an entry.");
    output::tip("Run `passvault list` to see all entries.");

    Ok(())
}
