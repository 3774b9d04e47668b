//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Entry` records and the `Document` that holds them (`entry`, `document`)
//! - Plaintext payload encoding (`codec`)
//! - Binary vault file format (`format`)
//! - Write-then-rename file access (`storage`)
//! - High-level `VaultStore` for opening and saving vaults (`store`)

pub mod codec;
pub mod document;
pub mod entry;
pub mod format;
pub mod storage;
pub mod store;

// Re-export the most commonly used items.
pub use document::{Document, VaultState};
pub use entry::Entry;
pub use format::VaultHeader;
pub use storage::{FileStorage, Storage};
pub use store::{change_master_password, new_document, open_vault, save_vault, VaultStore};
