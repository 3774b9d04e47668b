use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_MEMORY_KIB};
use crate::errors::{PassVaultError, Result};

/// User configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--vault` is not given.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Argon2 memory cost in KiB for newly derived keys (default: 64 MB).
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,

    /// Shortest master password accepted when choosing a new one.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Length of passwords produced by `generate` and `add --generate`.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "passwords.pvlt".to_string()
}

fn default_kdf_memory_kib() -> u32 {
    DEFAULT_MEMORY_KIB
}

fn default_min_password_len() -> usize {
    8
}

fn default_generator_length() -> usize {
    20
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf_memory_kib: default_kdf_memory_kib(),
            min_password_len: default_min_password_len(),
            generator_length: default_generator_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Resolve the vault path: an explicit path wins, otherwise
    /// `vault_file` relative to `dir`.
    pub fn vault_path(&self, dir: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => dir.join(&self.vault_file),
        }
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::argon2id(self.kdf_memory_kib)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, "passwords.pvlt");
        assert_eq!(s.kdf_memory_kib, 65_536);
        assert_eq!(s.min_password_len, 8);
        assert_eq!(s.generator_length, 20);
        assert!(s.kdf_params().validate().is_ok());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "passwords.pvlt");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "work.pvlt"
kdf_memory_kib = 131072
min_password_len = 12
generator_length = 32
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "work.pvlt");
        assert_eq!(settings.kdf_memory_kib, 131_072);
        assert_eq!(settings.min_password_len, 12);
        assert_eq!(settings.generator_length, 32);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "min_password_len = 10\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.min_password_len, 10);
        // Rest should be defaults
        assert_eq!(settings.vault_file, "passwords.pvlt");
        assert_eq!(settings.kdf_memory_kib, 65_536);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(PassVaultError::ConfigError(_))
        ));
    }

    #[test]
    fn vault_path_prefers_explicit_path() {
        let s = Settings::default();
        let dir = Path::new("/home/user");
        assert_eq!(
            s.vault_path(dir, None),
            PathBuf::from("/home/user/passwords.pvlt")
        );
        assert_eq!(
            s.vault_path(dir, Some(Path::new("/tmp/other.pvlt"))),
            PathBuf::from("/tmp/other.pvlt")
        );
    }
}
