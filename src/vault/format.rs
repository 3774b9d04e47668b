//! Binary vault file format.
//!
//! A vault file has this layout (all integers big-endian):
//!
//! ```text
//! [PVLT: 4][version: 1][kdf id: 1][kdf cost: 4][salt: 16][nonce: 12][ciphertext][tag: 16]
//! ```
//!
//! - **Magic** (`PVLT`): identifies the file as a PassVault vault.
//! - **Version**: format version (currently `1`).
//! - **KDF id / cost**: which key-derivation function and memory cost
//!   produced the key, so old files stay readable after the default moves.
//! - **Salt**: per-file random KDF salt.
//! - **Nonce / ciphertext / tag**: the AES-256-GCM envelope around the
//!   encoded entries.
//!
//! The first 26 bytes (magic through salt) are the AEAD associated data.

use crate::crypto::encryption::{Sealed, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{KdfAlgorithm, KdfParams, SALT_LEN};
use crate::errors::{PassVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
pub const MAGIC: &[u8; 4] = b"PVLT";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Magic + version + kdf id + kdf cost + salt.
pub const HEADER_LEN: usize = 4 + 1 + 1 + 4 + SALT_LEN;

/// Smallest possible file: header, nonce and tag around an empty ciphertext.
pub const MIN_FILE_LEN: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

// ---------------------------------------------------------------------------
// VaultHeader
// ---------------------------------------------------------------------------

/// The unencrypted parameters at the start of a vault file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultHeader {
    pub version: u8,
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
}

impl VaultHeader {
    pub fn new(kdf: KdfParams, salt: [u8; SALT_LEN]) -> Self {
        Self {
            version: CURRENT_VERSION,
            kdf,
            salt,
        }
    }

    /// Serialize to the fixed 26-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(MAGIC);
        buf[4] = self.version;
        buf[5] = self.kdf.algorithm.id();
        buf[6..10].copy_from_slice(&self.kdf.memory_kib.to_be_bytes());
        buf[10..HEADER_LEN].copy_from_slice(&self.salt);
        buf
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A vault file split into its parts, nothing decrypted yet.
#[derive(Debug)]
pub struct RawVault {
    pub header: VaultHeader,
    /// The header bytes exactly as stored, used as associated data.
    pub header_bytes: [u8; HEADER_LEN],
    pub sealed: Sealed,
}

/// Assemble a complete vault file.
pub fn encode_vault(header: &VaultHeader, sealed: &Sealed) -> Vec<u8> {
    let total = HEADER_LEN + NONCE_LEN + sealed.ciphertext.len() + TAG_LEN;
    let mut buf = Vec::with_capacity(total);

    buf.extend_from_slice(&header.to_bytes());
    buf.extend_from_slice(&sealed.nonce);
    buf.extend_from_slice(&sealed.ciphertext);
    buf.extend_from_slice(&sealed.tag);
    buf
}

/// Split a vault file into header and envelope.
///
/// Checks run in this order: full header present, magic, version, full
/// minimum length, KDF id, KDF cost.  Nothing here touches a key.
pub fn parse_vault(data: &[u8]) -> Result<RawVault> {
    if data.len() < HEADER_LEN {
        return Err(PassVaultError::MalformedPayload(format!(
            "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
            data.len()
        )));
    }

    if &data[0..4] != MAGIC {
        return Err(PassVaultError::MalformedPayload(
            "missing PVLT magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(PassVaultError::UnsupportedVersion(version));
    }

    if data.len() < MIN_FILE_LEN {
        return Err(PassVaultError::MalformedPayload(format!(
            "file is {} bytes, a vault needs at least {MIN_FILE_LEN}",
            data.len()
        )));
    }

    let algorithm = KdfAlgorithm::from_id(data[5]).ok_or_else(|| {
        PassVaultError::MalformedPayload(format!("unknown KDF algorithm id {}", data[5]))
    })?;

    let memory_kib = u32::from_be_bytes(read_array(data, 6)?);
    let kdf = KdfParams {
        algorithm,
        memory_kib,
    };
    kdf.validate()
        .map_err(|_| PassVaultError::MalformedPayload(format!("KDF cost {memory_kib} out of range")))?;

    let salt: [u8; SALT_LEN] = read_array(data, 10)?;
    let header_bytes: [u8; HEADER_LEN] = read_array(data, 0)?;
    let nonce: [u8; NONCE_LEN] = read_array(data, HEADER_LEN)?;

    let tag_start = data.len() - TAG_LEN;
    let tag: [u8; TAG_LEN] = read_array(data, tag_start)?;
    let ciphertext = data[HEADER_LEN + NONCE_LEN..tag_start].to_vec();

    Ok(RawVault {
        header: VaultHeader {
            version,
            kdf,
            salt,
        },
        header_bytes,
        sealed: Sealed {
            nonce,
            ciphertext,
            tag,
        },
    })
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| PassVaultError::MalformedPayload("truncated header".into()))
}
