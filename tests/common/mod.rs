#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url_shortener_bot::application::services::{ShortenerConfig, ShortenerService};
use url_shortener_bot::domain::alias::{AliasGenerator, GenerationError};
use url_shortener_bot::domain::repositories::{StoreError, UrlRepository};
use url_shortener_bot::infrastructure::persistence::MemoryUrlRepository;
use url_shortener_bot::state::AppState;

/// Hands out a fixed list of aliases in order, repeating the last one.
pub struct SequenceAliasGenerator {
    aliases: Vec<String>,
    next: AtomicUsize,
}

impl SequenceAliasGenerator {
    pub fn new(aliases: &[&str]) -> Self {
        assert!(!aliases.is_empty());
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl AliasGenerator for SequenceAliasGenerator {
    fn generate(&self, _length: usize) -> Result<String, GenerationError> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(self.aliases[index.min(self.aliases.len() - 1)].clone())
    }
}

/// Store whose every operation fails.
pub struct FailingRepository;

#[async_trait]
impl UrlRepository for FailingRepository {
    async fn save_url(&self, _target: &str, _alias: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("backend offline".to_string()))
    }

    async fn get_url(&self, _alias: &str) -> Result<String, StoreError> {
        Err(StoreError::Read("backend offline".to_string()))
    }

    async fn alias_exists(&self, _alias: &str) -> Result<bool, StoreError> {
        Err(StoreError::Read("backend offline".to_string()))
    }

    async fn insert_if_absent(&self, _target: &str, _alias: &str) -> Result<bool, StoreError> {
        Err(StoreError::Write("backend offline".to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Read("backend offline".to_string()))
    }
}

pub fn create_shortener(
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn AliasGenerator>,
    config: ShortenerConfig,
) -> Arc<ShortenerService> {
    Arc::new(ShortenerService::new(repository, generator, config))
}

pub fn create_test_state(
    generator: Arc<dyn AliasGenerator>,
) -> (AppState, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let shortener = create_shortener(repository.clone(), generator, ShortenerConfig::default());

    (AppState::new(shortener), repository)
}

pub fn create_failing_state() -> AppState {
    let shortener = create_shortener(
        Arc::new(FailingRepository),
        Arc::new(SequenceAliasGenerator::new(&["a1B2"])),
        ShortenerConfig::default(),
    );

    AppState::new(shortener)
}
