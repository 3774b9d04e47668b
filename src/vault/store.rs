//! High-level vault operations.
//!
//! `VaultStore` ties the codec, the cipher and the file format together.
//! It owns no document: callers keep their `Document` and pass it into
//! `save` and `change_master_password`, and receive a fresh one from
//! `open`.  Every operation either fully succeeds or leaves both the
//! document and the file on disk as they were.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::KdfParams;
use crate::crypto::keys::SessionKey;
use crate::errors::{PassVaultError, Result};

use super::codec;
use super::document::Document;
use super::format::{self, VaultHeader};
use super::storage::{FileStorage, Storage};

/// Opens and saves vault files.
///
/// Holds the KDF params used for new keys and a busy flag that rejects
/// overlapping operations, so a UI can run `open`/`save` on a worker
/// thread while keeping the store shared.
pub struct VaultStore<S = FileStorage> {
    storage: S,
    kdf: KdfParams,
    busy: AtomicBool,
}

impl Default for VaultStore<FileStorage> {
    fn default() -> Self {
        Self::new(KdfParams::default())
    }
}

impl VaultStore<FileStorage> {
    /// A store on the local filesystem deriving new keys with `kdf`.
    pub fn new(kdf: KdfParams) -> Self {
        Self::with_storage(FileStorage, kdf)
    }
}

impl<S: Storage> VaultStore<S> {
    pub fn with_storage(storage: S, kdf: KdfParams) -> Self {
        Self {
            storage,
            kdf,
            busy: AtomicBool::new(false),
        }
    }

    /// KDF params applied to newly derived keys.
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    /// True while an operation is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Open and decrypt the vault at `path`.
    ///
    /// A wrong password and a damaged file produce the same
    /// `WrongPasswordOrCorruptFile` error.
    pub fn open(&self, path: &Path, password: &[u8]) -> Result<Document> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let data = self.storage.read(path)?;
        let raw = format::parse_vault(&data)?;

        let session = SessionKey::derive(password, raw.header.salt, raw.header.kdf)?;

        let plaintext = match decrypt(session.key(), &raw.header_bytes, &raw.sealed) {
            Ok(plaintext) => plaintext,
            Err(PassVaultError::AuthenticationFailed) => {
                tracing::debug!(path = %path.display(), "vault authentication failed");
                return Err(PassVaultError::WrongPasswordOrCorruptFile);
            }
            Err(e) => return Err(e),
        };

        let mut document = codec::decode(&plaintext)?;
        document.mark_persisted(path, Some(session));

        tracing::debug!(
            path = %path.display(),
            entries = document.len(),
            memory_kib = raw.header.kdf.memory_kib,
            "vault opened"
        );
        Ok(document)
    }

    /// Encrypt `document` and atomically write it to `path`.
    ///
    /// A document without a session key gets a fresh salt and a key
    /// derived from `password`.  Otherwise the staged key is reused, and
    /// `password` must be the one it was derived from.
    pub fn save(&self, document: &mut Document, path: &Path, password: &[u8]) -> Result<()> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let fresh = match document.session() {
            Some(session) => {
                if !session.matches_password(password)? {
                    return Err(PassVaultError::PasswordMismatch);
                }
                None
            }
            None => Some(SessionKey::generate(password, self.kdf)?),
        };
        let session = fresh
            .as_ref()
            .or(document.session())
            .ok_or(PassVaultError::PasswordMismatch)?;

        let header = VaultHeader::new(session.params(), *session.salt());
        let header_bytes = header.to_bytes();

        let plaintext = codec::encode(document)?;
        let sealed = encrypt(session.key(), &header_bytes, &plaintext)?;
        let bytes = format::encode_vault(&header, &sealed);

        let staged = self.storage.stage(path, &bytes)?;
        if let Err(e) = self.storage.commit(&staged, path) {
            self.storage.discard(&staged);
            return Err(e);
        }

        document.mark_persisted(path, fresh);

        tracing::debug!(
            path = %path.display(),
            entries = document.len(),
            bytes = bytes.len(),
            "vault saved"
        );
        Ok(())
    }

    /// Stage a new master password on `document`.
    ///
    /// Derives a new key under a new salt and marks the document modified.
    /// Nothing is written: the file keeps opening with the old password
    /// until the next `save`.
    pub fn change_master_password(&self, document: &mut Document, new_password: &[u8]) -> Result<()> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let session = SessionKey::generate(new_password, self.kdf)?;
        document.stage_session(session);

        tracing::debug!("master password change staged");
        Ok(())
    }
}

/// Holds the busy flag for the duration of one operation.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PassVaultError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ----------------------------------------------------------------------
// Collaborator functions
// ----------------------------------------------------------------------

/// An empty, unsaved document.
pub fn new_document() -> Document {
    Document::new()
}

/// Open a vault with the default KDF settings.
pub fn open_vault(path: &Path, password: &[u8]) -> Result<Document> {
    VaultStore::default().open(path, password)
}

/// Save a vault with the default KDF settings.
pub fn save_vault(document: &mut Document, path: &Path, password: &[u8]) -> Result<()> {
    VaultStore::default().save(document, path, password)
}

/// Stage a master password change with the default KDF settings.
pub fn change_master_password(document: &mut Document, new_password: &[u8]) -> Result<()> {
    VaultStore::default().change_master_password(document, new_password)
}
