//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! result is kept in three parts (nonce, ciphertext, tag) because the
//! vault format stores them at fixed positions around the ciphertext.
//!
//! Associated data is authenticated but not encrypted; the vault passes
//! its header bytes here so a modified header fails the tag check.

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce, Tag};
use zeroize::Zeroizing;

use super::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Output of `encrypt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` under `key`, authenticating `aad` alongside it.
pub fn encrypt(key: &MasterKey, aad: &[u8], plaintext: &[u8]) -> Result<Sealed> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Random 96-bit nonce per call: collisions are negligible for the
    // handful of saves a vault ever sees under one key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let mut buffer = Zeroizing::new(plaintext.to_vec());
    let tag = cipher
        .encrypt_in_place_detached(&nonce, aad, buffer.as_mut_slice())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(Sealed {
        nonce: nonce.into(),
        ciphertext: std::mem::take(&mut *buffer),
        tag: tag.into(),
    })
}

/// Decrypt a `Sealed` blob produced by `encrypt`.
///
/// The tag is checked before anything is handed back.  Every failure,
/// whatever its cause, is reported as `AuthenticationFailed`, and the
/// working buffer is wiped.
pub fn decrypt(key: &MasterKey, aad: &[u8], sealed: &Sealed) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| PassVaultError::AuthenticationFailed)?;

    let nonce = Nonce::from_slice(&sealed.nonce);
    let tag = Tag::from_slice(&sealed.tag);

    let mut buffer = Zeroizing::new(sealed.ciphertext.clone());
    cipher
        .decrypt_in_place_detached(nonce, aad, buffer.as_mut_slice(), tag)
        .map_err(|_| PassVaultError::AuthenticationFailed)?;

    Ok(buffer)
}
