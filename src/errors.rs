use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Document errors ---
    #[error("An entry titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Entry '{0}' not found")]
    NotFound(String),

    #[error("Entry title must contain at least one non-whitespace character")]
    BlankTitle,

    // --- Vault errors ---
    #[error("Malformed vault payload: {0}")]
    MalformedPayload(String),

    #[error("Unsupported vault format version {0}")]
    UnsupportedVersion(u8),

    #[error("Wrong password or corrupted vault file")]
    WrongPasswordOrCorruptFile,

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Password does not match the current master password")]
    PasswordMismatch,

    #[error("Another vault operation is already in progress")]
    Busy,

    // --- Crypto errors ---
    /// Raised by the cipher layer only. The store translates it into
    /// `WrongPasswordOrCorruptFile` before it reaches a caller.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- IO errors ---
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
