//! In-memory key material.
//!
//! `MasterKey` is the raw AES key, wiped on drop.  `SessionKey` is what a
//! document carries between open/change and the next save: the key plus
//! the salt and KDF params it was derived with, which is everything needed
//! to write a header without asking for the password again.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::kdf::{derive_key, generate_salt, KdfParams, KEY_LEN, SALT_LEN};
use crate::errors::Result;

/// A wrapper around a 32-byte key that automatically zeroes its memory
/// when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.bytes
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

/// Derived key plus the salt and KDF params that produced it.
pub struct SessionKey {
    key: MasterKey,
    salt: [u8; SALT_LEN],
    params: KdfParams,
}

impl SessionKey {
    /// Derive a key from `password` under a freshly generated salt.
    pub fn generate(password: &[u8], params: KdfParams) -> Result<Self> {
        Self::derive(password, generate_salt(), params)
    }

    /// Derive a key from `password` under a known salt (e.g. from a header).
    pub fn derive(password: &[u8], salt: [u8; SALT_LEN], params: KdfParams) -> Result<Self> {
        let key = derive_key(password, &salt, &params)?;
        Ok(Self { key, salt, params })
    }

    pub fn key(&self) -> &MasterKey {
        &self.key
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn params(&self) -> KdfParams {
        self.params
    }

    /// Check whether `password` derives this exact key.
    ///
    /// Runs the full KDF with the stored salt and compares in constant time.
    pub fn matches_password(&self, password: &[u8]) -> Result<bool> {
        let candidate = derive_key(password, &self.salt, &self.params)?;
        Ok(candidate.as_bytes().ct_eq(self.key.as_bytes()).into())
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
