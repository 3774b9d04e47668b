//! A single credential record.
//!
//! Equality and hashing cover the content fields only (title, url, user,
//! password, rotation interval, notes).  Timestamps and the transient
//! password-changed flag are ignored, so an entry read back from disk
//! compares equal to the one that was saved.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// One credential stored in a document.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Unique, non-blank name of the entry (e.g. "Bank").
    pub title: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// When the entry was last added or edited.
    #[serde(default)]
    #[zeroize(skip)]
    pub modified_date: Option<DateTime<Utc>>,

    /// When the password field last changed.
    #[serde(default)]
    #[zeroize(skip)]
    pub last_password_changed: Option<DateTime<Utc>>,

    /// Rotation interval in days; `0` disables rotation reminders.
    #[serde(default)]
    pub change_password_in_days: u32,

    /// Set by `Document::update` when the password differs from the
    /// previous value.  Never persisted.
    #[serde(skip)]
    pub(crate) is_password_changed: bool,
}

impl Entry {
    /// Create an entry with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        let mut entry = Self::default();
        entry.title = title.into();
        entry
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.set_password(Some(password.into()));
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_rotation_days(mut self, days: u32) -> Self {
        self.change_password_in_days = days;
        self
    }

    /// Replace the title.  The previous one comes back wrapped so it is
    /// wiped when the caller drops it.
    pub fn set_title(&mut self, title: impl Into<String>) -> Zeroizing<String> {
        Zeroizing::new(std::mem::replace(&mut self.title, title.into()))
    }

    /// Replace the password, handing back the previous one for wiping.
    pub fn set_password(&mut self, password: Option<String>) -> Option<Zeroizing<String>> {
        std::mem::replace(&mut self.password, password).map(Zeroizing::new)
    }

    /// True if the last `Document::update` changed the password.
    pub fn is_password_changed(&self) -> bool {
        self.is_password_changed
    }

    /// Titles must contain at least one non-whitespace character.
    pub fn has_valid_title(&self) -> bool {
        is_valid_title(&self.title)
    }

    /// When the password should next be rotated.
    ///
    /// `None` if rotation is disabled or no password change was recorded.
    pub fn password_expires_at(&self) -> Option<DateTime<Utc>> {
        if self.change_password_in_days == 0 {
            return None;
        }
        let changed = self.last_password_changed?;
        changed.checked_add_signed(Duration::days(i64::from(self.change_password_in_days)))
    }

    /// Whether the password is due for rotation at `now`.
    ///
    /// An entry with rotation enabled but no recorded change is always due.
    pub fn is_password_due(&self, now: DateTime<Utc>) -> bool {
        if self.change_password_in_days == 0 {
            return false;
        }
        match self.password_expires_at() {
            Some(expires) => now >= expires,
            None => true,
        }
    }
}

pub(crate) fn is_valid_title(title: &str) -> bool {
    title.chars().any(|c| !c.is_whitespace())
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.url == other.url
            && self.user == other.user
            && self.password == other.password
            && self.change_password_in_days == other.change_password_in_days
            && self.notes == other.notes
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.url.hash(state);
        self.user.hash(state);
        self.password.hash(state);
        self.change_password_in_days.hash(state);
        self.notes.hash(state);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("notes", &self.notes.as_ref().map(|_| "<redacted>"))
            .field("modified_date", &self.modified_date)
            .field("last_password_changed", &self.last_password_changed)
            .field("change_password_in_days", &self.change_password_in_days)
            .finish()
    }
}
