//! Random password generator.
//!
//! Draws from the thread-local CSPRNG.  Every enabled character class
//! contributes at least one character, then the result is shuffled so
//! the guaranteed characters do not sit at fixed positions.

use rand::seq::{IndexedRandom, SliceRandom};
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.<>/?~";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

/// Which characters a generated password may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 20,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl GeneratorOptions {
    fn classes(&self) -> Vec<&'static [u8]> {
        let mut classes = Vec::with_capacity(4);
        if self.lowercase {
            classes.push(LOWER);
        }
        if self.uppercase {
            classes.push(UPPER);
        }
        if self.digits {
            classes.push(DIGITS);
        }
        if self.symbols {
            classes.push(SYMBOLS);
        }
        classes
    }
}

/// Generate a password according to `options`.
pub fn generate_password(options: &GeneratorOptions) -> Result<Zeroizing<String>> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(PassVaultError::CommandFailed(format!(
            "password length must be between {MIN_LENGTH} and {MAX_LENGTH}"
        )));
    }

    let classes = options.classes();
    if classes.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "at least one character class must be enabled".into(),
        ));
    }

    let alphabet: Vec<u8> = classes.iter().flat_map(|c| c.iter().copied()).collect();
    let mut rng = rand::rng();
    let mut chars = Zeroizing::new(Vec::with_capacity(options.length));

    for class in &classes {
        if let Some(&c) = class.choose(&mut rng) {
            chars.push(c);
        }
    }
    while chars.len() < options.length {
        if let Some(&c) = alphabet.choose(&mut rng) {
            chars.push(c);
        }
    }
    chars.shuffle(&mut rng);

    Ok(Zeroizing::new(chars.iter().map(|&b| char::from(b)).collect()))
}
