//! The in-memory collection of entries a vault file holds.
//!
//! A `Document` owns its entries, the path it was last opened from or
//! saved to, and the session key staged for the next save.  Its
//! `modified` flag is only ever changed by its own methods and by the
//! store after a successful open or save.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::entry::{is_valid_title, Entry};
use crate::crypto::keys::SessionKey;
use crate::errors::{PassVaultError, Result};

/// Persistence state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// Never opened from or saved to a file, and nothing changed.
    Unopened,
    /// Matches the file it was last opened from or saved to.
    Clean,
    /// Has changes that are not on disk yet.
    Dirty,
}

#[derive(Debug, Default)]
pub struct Document {
    entries: Vec<Entry>,
    file_name: Option<PathBuf>,
    session: Option<SessionKey>,
    modified: bool,
}

impl Document {
    /// An empty, unsaved document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean document from decoded entries.
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append a new entry.
    pub fn add(&mut self, mut entry: Entry) -> Result<()> {
        if !entry.has_valid_title() {
            return Err(PassVaultError::BlankTitle);
        }
        if self.position(&entry.title).is_some() {
            return Err(PassVaultError::DuplicateTitle(entry.title.clone()));
        }

        let now = Utc::now();
        entry.modified_date = Some(now);
        if entry.password.is_some() && entry.last_password_changed.is_none() {
            entry.last_password_changed = Some(now);
        }

        self.entries.push(entry);
        self.modified = true;
        Ok(())
    }

    /// Replace the entry titled `title` with `new_entry`, keeping its position.
    pub fn update(&mut self, title: &str, mut new_entry: Entry) -> Result<()> {
        let index = self
            .position(title)
            .ok_or_else(|| PassVaultError::NotFound(title.to_string()))?;

        if !new_entry.has_valid_title() {
            return Err(PassVaultError::BlankTitle);
        }
        if new_entry.title != title && self.position(&new_entry.title).is_some() {
            return Err(PassVaultError::DuplicateTitle(new_entry.title.clone()));
        }

        let now = Utc::now();
        let old = &self.entries[index];
        new_entry.is_password_changed = old.password != new_entry.password;
        new_entry.last_password_changed = if new_entry.is_password_changed {
            Some(now)
        } else {
            old.last_password_changed
        };
        new_entry.modified_date = Some(now);

        self.entries[index] = new_entry;
        self.modified = true;
        Ok(())
    }

    /// Delete the entry titled `title`.
    pub fn remove(&mut self, title: &str) -> Result<()> {
        let index = self
            .position(title)
            .ok_or_else(|| PassVaultError::NotFound(title.to_string()))?;
        self.entries.remove(index);
        self.modified = true;
        Ok(())
    }

    /// Copy the entry titled `title` under `new_title`.
    pub fn duplicate(&mut self, title: &str, new_title: &str) -> Result<()> {
        let mut copy = self
            .find_by_title(title)
            .cloned()
            .ok_or_else(|| PassVaultError::NotFound(title.to_string()))?;
        copy.set_title(new_title);
        copy.last_password_changed = None;
        self.add(copy)
    }

    /// Case-sensitive exact lookup.
    pub fn find_by_title(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// All titles, in insertion order.
    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// Entries whose title contains `criteria`, ignoring case.
    ///
    /// An empty (or whitespace-only) criteria matches everything.
    pub fn search(&self, criteria: &str) -> Vec<&Entry> {
        let needle = criteria.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Entries whose password should be rotated at `now`.
    pub fn due_for_rotation(&self, now: DateTime<Utc>) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.is_password_due(now))
            .collect()
    }

    /// Reset to an empty, unnamed document and drop the session key.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.file_name = None;
        self.session = None;
        self.modified = false;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Path of the last successful open or save.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn state(&self) -> VaultState {
        if self.modified {
            VaultState::Dirty
        } else if self.file_name.is_some() {
            VaultState::Clean
        } else {
            VaultState::Unopened
        }
    }

    /// True once a master password has been set or loaded.
    pub fn has_master_key(&self) -> bool {
        self.session.is_some()
    }

    // ------------------------------------------------------------------
    // Store hooks
    // ------------------------------------------------------------------

    pub(crate) fn session(&self) -> Option<&SessionKey> {
        self.session.as_ref()
    }

    /// Stage a new key for the next save.
    pub(crate) fn stage_session(&mut self, session: SessionKey) {
        self.session = Some(session);
        self.modified = true;
    }

    /// Record a successful open or save of `path`.
    ///
    /// `session` replaces the staged key when given; a save that reused
    /// the staged key passes `None`.
    pub(crate) fn mark_persisted(&mut self, path: &Path, session: Option<SessionKey>) {
        if let Some(session) = session {
            self.session = Some(session);
        }
        self.file_name = Some(path.to_path_buf());
        self.modified = false;
        for entry in &mut self.entries {
            entry.is_password_changed = false;
        }
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }
}

/// Check a title without building an entry.
pub fn validate_title(title: &str) -> Result<()> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(PassVaultError::BlankTitle)
    }
}
