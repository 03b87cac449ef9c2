mod common;

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;
use url_shortener_bot::application::services::{AllocationStrategy, ShortenerConfig};
use url_shortener_bot::domain::repositories::{StoreError, UrlRepository};
use url_shortener_bot::infrastructure::persistence::MemoryUrlRepository;
use url_shortener_bot::utils::code_generator::RandomAliasGenerator;

use common::SequenceAliasGenerator;

/// Wraps the in-memory store and holds the first two alias checks or claims
/// at a barrier, so both callers observe the store before either writes.
struct LockstepRepository {
    inner: MemoryUrlRepository,
    barrier: Barrier,
    gated: AtomicUsize,
}

impl LockstepRepository {
    fn new() -> Self {
        Self {
            inner: MemoryUrlRepository::new(),
            barrier: Barrier::new(2),
            gated: AtomicUsize::new(0),
        }
    }

    async fn rendezvous(&self) {
        if self.gated.fetch_add(1, Ordering::SeqCst) < 2 {
            self.barrier.wait().await;
        }
    }
}

#[async_trait]
impl UrlRepository for LockstepRepository {
    async fn save_url(&self, target: &str, alias: &str) -> Result<(), StoreError> {
        self.inner.save_url(target, alias).await
    }

    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        self.inner.get_url(alias).await
    }

    async fn alias_exists(&self, alias: &str) -> Result<bool, StoreError> {
        let exists = self.inner.alias_exists(alias).await?;
        self.rendezvous().await;
        Ok(exists)
    }

    async fn insert_if_absent(&self, target: &str, alias: &str) -> Result<bool, StoreError> {
        self.rendezvous().await;
        self.inner.insert_if_absent(target, alias).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.inner.count().await
    }
}

fn config(strategy: AllocationStrategy) -> ShortenerConfig {
    ShortenerConfig {
        strategy,
        ..ShortenerConfig::default()
    }
}

/// Regression test for the known limitation of check-then-save: two callers
/// forced onto the same alias both succeed, and the first caller's alias
/// ends up pointing at the second caller's URL.
#[tokio::test]
async fn test_check_then_save_race_overwrites_first_mapping() {
    let repo = Arc::new(LockstepRepository::new());
    let shortener = common::create_shortener(
        repo.clone(),
        Arc::new(SequenceAliasGenerator::new(&["same"])),
        config(AllocationStrategy::CheckThenSave),
    );

    let (first, second) = tokio::join!(
        shortener.shorten("https://first.example.com"),
        shortener.shorten("https://second.example.com"),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(first.alias, "same");
    assert_eq!(second.alias, "same");
    assert_eq!(repo.count().await.unwrap(), 1);

    let resolved = repo.get_url("same").await.unwrap();
    let losers = [&first, &second]
        .iter()
        .filter(|mapping| mapping.target != resolved)
        .count();
    assert_eq!(losers, 1, "exactly one caller's alias was silently taken over");
}

#[tokio::test]
async fn test_atomic_claim_resolves_forced_collision() {
    let repo = Arc::new(LockstepRepository::new());
    let generator = Arc::new(SequenceAliasGenerator::new(&["same", "same", "next"]));
    let shortener = common::create_shortener(
        repo.clone(),
        generator.clone(),
        config(AllocationStrategy::Atomic),
    );

    let (first, second) = tokio::join!(
        shortener.shorten("https://first.example.com"),
        shortener.shorten("https://second.example.com"),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert_ne!(first.alias, second.alias);
    assert_eq!(generator.calls(), 3);
    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.get_url(&first.alias).await.unwrap(), first.target);
    assert_eq!(repo.get_url(&second.alias).await.unwrap(), second.target);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_are_unique() {
    let repo = Arc::new(MemoryUrlRepository::new());
    let shortener = common::create_shortener(
        repo.clone(),
        Arc::new(RandomAliasGenerator),
        ShortenerConfig::default(),
    );

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let shortener = shortener.clone();
            tokio::spawn(async move {
                shortener
                    .shorten(&format!("https://example.com/{i}"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut aliases = HashSet::new();
    for handle in handles {
        let mapping = handle.await.unwrap();
        assert_eq!(repo.get_url(&mapping.alias).await.unwrap(), mapping.target);
        assert!(aliases.insert(mapping.alias));
    }

    assert_eq!(repo.count().await.unwrap(), 200);
}

#[tokio::test]
async fn test_exhausted_retries_overwrite_through_store_contract() {
    let repo = Arc::new(MemoryUrlRepository::new());
    repo.save_url("https://old.example.com", "a1B2").await.unwrap();

    let generator = Arc::new(SequenceAliasGenerator::new(&["a1B2"]));
    let shortener = common::create_shortener(
        repo.clone(),
        generator.clone(),
        ShortenerConfig::default(),
    );

    let mapping = shortener.shorten("https://new.example.com").await.unwrap();

    assert_eq!(mapping.alias, "a1B2");
    assert_eq!(generator.calls(), 5);
    assert_eq!(repo.get_url("a1B2").await.unwrap(), "https://new.example.com");
}
