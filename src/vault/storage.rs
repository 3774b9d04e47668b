//! Filesystem access for vault files.
//!
//! Writes are split into two steps so the target path is only ever
//! replaced by a rename: `stage` writes the complete new file next to
//! the target, `commit` moves it into place.  If the process dies
//! between the two, the old file is untouched.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Storage backend used by `VaultStore`.
pub trait Storage {
    /// Read a whole vault file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write `bytes` to a temporary file beside `target`, flushed to disk.
    /// Returns the temporary path.
    fn stage(&self, target: &Path, bytes: &[u8]) -> Result<PathBuf>;

    /// Atomically replace `target` with the staged file.
    fn commit(&self, staged: &Path, target: &Path) -> Result<()>;

    /// Remove a staged file after a failed write.
    fn discard(&self, staged: &Path);
}

/// Local filesystem storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStorage;

impl Storage for FileStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn stage(&self, target: &Path, bytes: &[u8]) -> Result<PathBuf> {
        let tmp_path = staging_path(target);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let written = options.open(&tmp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written {
            self.discard(&tmp_path);
            return Err(e.into());
        }

        Ok(tmp_path)
    }

    fn commit(&self, staged: &Path, target: &Path) -> Result<()> {
        fs::rename(staged, target)?;

        // Persist the rename itself.  Directory handles cannot be
        // opened on Windows, where rename durability is the OS's job.
        #[cfg(unix)]
        if let Some(parent) = parent_dir(target) {
            fs::File::open(parent)?.sync_all()?;
        }

        Ok(())
    }

    fn discard(&self, staged: &Path) {
        let _ = fs::remove_file(staged);
    }
}

/// Temp path in the target's own directory, so the rename never crosses
/// filesystems: `dir/.name.tmp`.
pub fn staging_path(target: &Path) -> PathBuf {
    let parent = parent_dir(target).unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        target.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
