//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{Document, VaultStore};

/// Environment variable holding the master password (scripts and tests).
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// Environment variable holding the new master password for `passwd`.
pub const NEW_PASSWORD_ENV: &str = "PASSVAULT_NEW_PASSWORD";

/// PassVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .passvault.toml)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,
}

/// Field values shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct EntryFields {
    /// Website or service URL
    #[arg(long)]
    pub url: Option<String>,

    /// User name
    #[arg(long)]
    pub user: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Remind to change the password every N days (0 disables)
    #[arg(long)]
    pub rotate_days: Option<u32>,

    /// Generate a random password instead of prompting for one
    #[arg(long)]
    pub generate: bool,
}

/// Which entry field `get` prints.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Password,
    User,
    Url,
    Notes,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add an entry
    Add {
        /// Entry title (must be unique)
        title: String,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Edit an existing entry
    Edit {
        /// Title of the entry to edit
        title: String,
        /// Rename the entry
        #[arg(long)]
        rename: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Print one field of an entry
    Get {
        /// Entry title
        title: String,
        /// Field to print
        #[arg(short, long, value_enum, default_value = "password")]
        field: Field,
    },

    /// List entries
    List {
        /// Only show entries whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry title
        title: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy an entry under a new title
    Duplicate {
        /// Entry to copy
        title: String,
        /// Title of the copy
        new_title: String,
    },

    /// Change the vault's master password
    Passwd,

    /// Generate a random password
    Generate {
        /// Password length (default: `generator_length` from settings)
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,
        /// Leave out digits
        #[arg(long)]
        no_digits: bool,
        /// Leave out upper-case letters
        #[arg(long)]
        no_uppercase: bool,
    },

    /// List entries whose password is due for rotation
    Due,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Settings, vault path and store resolved from the CLI arguments.
pub struct Context {
    pub settings: Settings,
    pub path: PathBuf,
    pub store: VaultStore,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;
        let kdf = settings.kdf_params();
        kdf.validate()
            .map_err(|e| PassVaultError::ConfigError(e.to_string()))?;
        let path = settings.vault_path(&cwd, cli.vault.as_deref());
        Ok(Self {
            settings,
            path,
            store: VaultStore::new(kdf),
        })
    }

    /// Prompt for the master password and open the vault.
    ///
    /// Returns the password too, since `save` needs it again.
    pub fn open(&self) -> Result<(Document, Zeroizing<String>)> {
        let password = prompt_password()?;
        let document = self.store.open(&self.path, password.as_bytes())?;
        Ok((document, password))
    }

    /// Save `document` back to the vault path.
    pub fn save(&self, document: &mut Document, password: &str) -> Result<()> {
        self.store.save(document, &self.path, password.as_bytes())
    }
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// `env_var` is checked first for scripted usage.  Enforces `min_len`.
pub fn prompt_new_password(env_var: &str, min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(env_var) {
        if pw.chars().count() < min_len {
            return Err(PassVaultError::CommandFailed(format!(
                "password must be at least {min_len} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Prompt for an entry's password (hidden input, confirmed).
pub fn prompt_entry_password(title: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for '{title}'"))
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Refuse to create a vault over an existing file.
pub fn ensure_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(PassVaultError::VaultAlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_fields() {
        let cli = Cli::parse_from([
            "passvault",
            "add",
            "Bank",
            "--user",
            "alice",
            "--rotate-days",
            "90",
            "--generate",
        ]);
        match cli.command {
            Commands::Add { title, fields } => {
                assert_eq!(title, "Bank");
                assert_eq!(fields.user.as_deref(), Some("alice"));
                assert_eq!(fields.rotate_days, Some(90));
                assert!(fields.generate);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn get_defaults_to_password_field() {
        let cli = Cli::parse_from(["passvault", "get", "Bank"]);
        assert!(matches!(
            cli.command,
            Commands::Get {
                field: Field::Password,
                ..
            }
        ));
    }

    #[test]
    fn vault_flag_is_global() {
        let cli = Cli::parse_from(["passvault", "list", "--vault", "/tmp/x.pvlt"]);
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/x.pvlt")));
    }

    #[test]
    fn ensure_absent_rejects_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("v.pvlt");
        assert!(ensure_absent(&path).is_ok());
        std::fs::write(&path, b"x").unwrap();
        assert!(matches!(
            ensure_absent(&path),
            Err(PassVaultError::VaultAlreadyExists(_))
        ));
    }
}
