//! Alias alphabet and the generator contract.

/// The 62 symbols an alias may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Aliases that collide with fixed HTTP routes and are never handed out.
pub const RESERVED_ALIASES: &[&str] = &["health"];

/// The random source could not produce a candidate.
#[derive(Debug, thiserror::Error)]
#[error("random source unavailable: {0}")]
pub struct GenerationError(pub String);

/// Produces candidate aliases for the allocator.
///
/// Every call is independent: no sequence, counter, or derivation from the
/// target URL.
///
/// # Implementations
///
/// - [`crate::utils::code_generator::RandomAliasGenerator`] - OS entropy
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Returns a fresh candidate of exactly `length` symbols from [`ALPHABET`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the random source fails.
    fn generate(&self, length: usize) -> Result<String, GenerationError>;
}

/// Returns true if `alias` is reserved for a fixed route.
pub fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// Returns true if `alias` has `length` symbols, all drawn from [`ALPHABET`].
#[cfg(test)]
pub(crate) fn is_well_formed(alias: &str, length: usize) -> bool {
    alias.len() == length && alias.bytes().all(|b| ALPHABET.contains(&b))
}
