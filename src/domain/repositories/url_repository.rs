//! Repository trait for alias → URL storage.

use async_trait::async_trait;

/// Errors returned by a [`UrlRepository`].
///
/// [`StoreError::NotFound`] is an expected outcome of a lookup and must never
/// be reported as a backend failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("alias not found")]
    NotFound,
    #[error("store read failed: {0}")]
    Read(String),
    #[error("store write failed: {0}")]
    Write(String),
}

impl StoreError {
    /// Returns true for the expected absence signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Repository interface for alias → target URL mappings.
///
/// The store enforces no uniqueness on [`UrlRepository::save_url`]; alias
/// uniqueness is the allocator's job, either through
/// [`UrlRepository::insert_if_absent`] or an explicit existence check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-memory map behind a RW lock
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores `target` under `alias`, silently replacing any previous mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on backend errors.
    async fn save_url(&self, target: &str, alias: &str) -> Result<(), StoreError>;

    /// Retrieves the target URL for `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the alias was never saved.
    /// Returns [`StoreError::Read`] on backend errors.
    async fn get_url(&self, alias: &str) -> Result<String, StoreError>;

    /// Checks whether `alias` is already taken.
    ///
    /// Absence is `Ok(false)`, never [`StoreError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on backend errors.
    async fn alias_exists(&self, alias: &str) -> Result<bool, StoreError>;

    /// Atomically stores `target` under `alias` unless the alias is taken.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the mapping was inserted
    /// - `Ok(false)` if the alias already existed (nothing is written)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on backend errors.
    async fn insert_if_absent(&self, target: &str, alias: &str) -> Result<bool, StoreError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on backend errors.
    async fn count(&self) -> Result<usize, StoreError>;
}
