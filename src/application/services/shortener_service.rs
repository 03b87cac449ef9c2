//! Alias allocation and resolution service.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::alias::{AliasGenerator, GenerationError};
use crate::domain::entities::Mapping;
use crate::domain::repositories::{StoreError, UrlRepository};

/// Default number of symbols in a generated alias.
pub const DEFAULT_ALIAS_LENGTH: usize = 4;

/// Default number of generation attempts per allocation.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Errors returned by [`ShortenerService::shorten`].
///
/// Each variant names the phase that failed. Collisions are never reported
/// here; they are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("failed to generate alias: {0}")]
    Generation(#[from] GenerationError),
    #[error("failed to check alias existence: {0}")]
    ExistenceCheck(#[source] StoreError),
    #[error("failed to save url: {0}")]
    Save(#[source] StoreError),
}

/// How a candidate alias is claimed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationStrategy {
    /// Claim with a single [`UrlRepository::insert_if_absent`] call.
    ///
    /// Concurrent allocations can never hand out the same alias.
    #[default]
    Atomic,
    /// Check with [`UrlRepository::alias_exists`], then [`UrlRepository::save_url`].
    ///
    /// Two concurrent calls can both see a candidate as free and both save it;
    /// the later save wins. Kept for deployments that depend on the old
    /// behaviour.
    CheckThenSave,
}

/// Unknown value for [`AllocationStrategy`].
#[derive(Debug, thiserror::Error)]
#[error("unknown allocation strategy '{0}', expected 'atomic' or 'check-then-save'")]
pub struct ParseStrategyError(String);

impl FromStr for AllocationStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "check-then-save" | "check_then_save" => Ok(Self::CheckThenSave),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => f.write_str("atomic"),
            Self::CheckThenSave => f.write_str("check-then-save"),
        }
    }
}

/// Allocation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenerConfig {
    pub alias_length: usize,
    pub max_retries: usize,
    pub strategy: AllocationStrategy,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_retries: DEFAULT_MAX_RETRIES,
            strategy: AllocationStrategy::default(),
        }
    }
}

/// Service for allocating short aliases and resolving them.
///
/// Holds no mutable state; one instance is shared by every transport adapter.
pub struct ShortenerService {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn AliasGenerator>,
    config: ShortenerConfig,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn AliasGenerator>,
        config: ShortenerConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    /// Allocates a unique alias for `target` and persists the mapping.
    ///
    /// The target is stored as given; URL syntax is checked by the caller.
    ///
    /// # Retry Policy
    ///
    /// Up to `max_retries` candidates are generated. A candidate that is
    /// already taken counts as a collision and a new one is drawn. If every
    /// candidate collides, the last one is saved anyway and overwrites the
    /// existing mapping for that alias.
    ///
    /// Store errors are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Generation`] if the random source fails,
    /// [`ShortenError::ExistenceCheck`] if a lookup fails and
    /// [`ShortenError::Save`] if the write fails.
    pub async fn shorten(&self, target: &str) -> Result<Mapping, ShortenError> {
        let alias = match self.config.strategy {
            AllocationStrategy::Atomic => self.allocate_atomic(target).await?,
            AllocationStrategy::CheckThenSave => self.allocate_check_then_save(target).await?,
        };

        debug!(alias = %alias, target, "Allocated alias");
        Ok(Mapping::new(alias, target))
    }

    /// Retrieves the target URL for `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the alias is unknown, or the
    /// backend error otherwise.
    pub async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        self.repository.get_url(alias).await
    }

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the store cannot be read.
    pub async fn mapping_count(&self) -> Result<usize, StoreError> {
        self.repository.count().await
    }

    async fn allocate_atomic(&self, target: &str) -> Result<String, ShortenError> {
        let attempts = self.attempts();
        let mut alias = self.next_candidate()?;

        for attempt in 1..=attempts {
            let claimed = self
                .repository
                .insert_if_absent(target, &alias)
                .await
                .map_err(claim_error)?;

            if claimed {
                return Ok(alias);
            }

            debug!(alias = %alias, attempt, "Alias collision");

            if attempt < attempts {
                alias = self.next_candidate()?;
            }
        }

        warn!(alias = %alias, attempts, "Retry budget exhausted, overwriting existing alias");
        self.repository
            .save_url(target, &alias)
            .await
            .map_err(ShortenError::Save)?;

        Ok(alias)
    }

    async fn allocate_check_then_save(&self, target: &str) -> Result<String, ShortenError> {
        let attempts = self.attempts();
        let mut alias = String::new();
        let mut accepted = false;

        for attempt in 1..=attempts {
            alias = self.next_candidate()?;

            let exists = self
                .repository
                .alias_exists(&alias)
                .await
                .map_err(ShortenError::ExistenceCheck)?;

            if !exists {
                accepted = true;
                break;
            }

            debug!(alias = %alias, attempt, "Alias collision");
        }

        if !accepted {
            warn!(alias = %alias, attempts, "Retry budget exhausted, overwriting existing alias");
        }

        self.repository
            .save_url(target, &alias)
            .await
            .map_err(ShortenError::Save)?;

        Ok(alias)
    }

    fn next_candidate(&self) -> Result<String, ShortenError> {
        Ok(self.generator.generate(self.config.alias_length)?)
    }

    fn attempts(&self) -> usize {
        self.config.max_retries.max(1)
    }
}

/// Maps a failed claim to the phase it belongs to.
fn claim_error(e: StoreError) -> ShortenError {
    match e {
        StoreError::Write(_) => ShortenError::Save(e),
        _ => ShortenError::ExistenceCheck(e),
    }
}
