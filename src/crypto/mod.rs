//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - Zeroizing key holders (`keys`)
//! - A random password generator (`generator`)

pub mod encryption;
pub mod generator;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, Sealed};
pub use generator::{generate_password, GeneratorOptions};
pub use kdf::{derive_key, generate_salt, KdfAlgorithm, KdfParams};
pub use keys::{MasterKey, SessionKey};
