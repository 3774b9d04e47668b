//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The memory cost is stored in every vault header,
//! so files written with an older default stay readable after the
//! default is raised.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};

use super::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Length of the per-file salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum accepted memory cost in KiB (8 MB).
pub const MIN_MEMORY_KIB: u32 = 8_192;

/// Maximum accepted memory cost in KiB (1 GB).  Header costs above this
/// are refused before anything is allocated.
pub const MAX_MEMORY_KIB: u32 = 1024 * 1024;

/// Default memory cost in KiB (64 MB).
pub const DEFAULT_MEMORY_KIB: u32 = 65_536;

/// Key-derivation algorithms a vault header can name.
///
/// The algorithm id pins every Argon2 parameter except memory, which
/// travels in the header as the cost field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// Argon2id v1.3, 3 passes, 4 lanes.
    Argon2id,
}

impl KdfAlgorithm {
    /// Identifier written to the vault header.
    pub fn id(self) -> u8 {
        match self {
            Self::Argon2id => 1,
        }
    }

    /// Look up an algorithm by its header identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Argon2id),
            _ => None,
        }
    }

    fn iterations(self) -> u32 {
        match self {
            Self::Argon2id => 3,
        }
    }

    fn parallelism(self) -> u32 {
        match self {
            Self::Argon2id => 4,
        }
    }
}

/// KDF settings recorded alongside each salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub algorithm: KdfAlgorithm,
    /// Memory cost in KiB; this is the header's `kdf_cost` field.
    pub memory_kib: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Argon2id,
            memory_kib: DEFAULT_MEMORY_KIB,
        }
    }
}

impl KdfParams {
    /// Argon2id params with the given memory cost.
    pub fn argon2id(memory_kib: u32) -> Self {
        Self {
            algorithm: KdfAlgorithm::Argon2id,
            memory_kib,
        }
    }

    /// Reject costs outside the accepted range.
    ///
    /// Applied to configured values and to values read from a header, so
    /// a crafted file cannot downgrade the KDF or demand absurd memory.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "Argon2 memory cost must be at least {MIN_MEMORY_KIB} KiB (got {})",
                self.memory_kib
            )));
        }
        if self.memory_kib > MAX_MEMORY_KIB {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "Argon2 memory cost must be at most {MAX_MEMORY_KIB} KiB (got {})",
                self.memory_kib
            )));
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + params always produce the same key.
pub fn derive_key(password: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<MasterKey> {
    kdf.validate()?;

    let params = Params::new(
        kdf.memory_kib,
        kdf.algorithm.iterations(),
        kdf.algorithm.parallelism(),
        Some(KEY_LEN),
    )
    .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = MasterKey::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, key.as_mut_bytes())
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
