//! `passvault generate`: print a random password.

use crate::cli::{Cli, Context};
use crate::crypto::generator::{generate_password, GeneratorOptions};
use crate::errors::Result;

/// Character classes left out on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exclusions {
    pub symbols: bool,
    pub digits: bool,
    pub uppercase: bool,
}

/// Execute the `generate` command.  Does not touch the vault.
pub fn execute(cli: &Cli, length: Option<usize>, exclude: Exclusions) -> Result<()> {
    let ctx = Context::load(cli)?;
    let options = options_for(length.unwrap_or(ctx.settings.generator_length), exclude);
    let password = generate_password(&options)?;
    println!("{}", password.as_str());
    Ok(())
}

fn options_for(length: usize, exclude: Exclusions) -> GeneratorOptions {
    GeneratorOptions {
        length,
        lowercase: true,
        uppercase: !exclude.uppercase,
        digits: !exclude.digits,
        symbols: !exclude.symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusions_turn_off_classes() {
        let opts = options_for(
            16,
            Exclusions {
                symbols: true,
                digits: true,
                uppercase: false,
            },
        );
        assert_eq!(opts.length, 16);
        assert!(opts.lowercase && opts.uppercase);
        assert!(!opts.digits && !opts.symbols);

        let pw = generate_password(&opts).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_alphabetic()));
    }
}
