//! Short alias generation.
//!
//! Provides cryptographically secure random aliases drawn uniformly from the
//! 62-symbol alphanumeric alphabet.

use crate::domain::alias::{ALPHABET, AliasGenerator, GenerationError, is_reserved};

/// Largest multiple of the alphabet size that fits in a byte.
///
/// Bytes at or above this bound are discarded so every symbol has the same
/// probability.
const ACCEPT_BOUND: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generates a random alias of `length` symbols from [`ALPHABET`].
///
/// Uses `getrandom` for entropy with rejection sampling, so the result is
/// uniform over the alphabet. Reserved aliases are never returned.
///
/// # Errors
///
/// Returns [`GenerationError`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(4)?;
/// assert_eq!(alias.len(), 4);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> Result<String, GenerationError> {
    loop {
        let alias = random_symbols(length)?;
        if !is_reserved(&alias) {
            return Ok(alias);
        }
    }
}

fn random_symbols(length: usize) -> Result<String, GenerationError> {
    let mut alias = String::with_capacity(length);
    let mut buffer = [0u8; 32];

    while alias.len() < length {
        getrandom::fill(&mut buffer).map_err(|e| GenerationError(e.to_string()))?;

        for &byte in buffer.iter().filter(|&&b| b < ACCEPT_BOUND) {
            if alias.len() == length {
                break;
            }
            alias.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
        }
    }

    Ok(alias)
}

/// [`AliasGenerator`] backed by the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAliasGenerator;

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self, length: usize) -> Result<String, GenerationError> {
        generate_alias(length)
    }
}
