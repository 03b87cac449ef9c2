//! In-memory implementation of [`UrlRepository`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{StoreError, UrlRepository};

/// Alias → target map guarded by a single reader/writer lock.
///
/// Lookups share the read lock; writes hold the write lock for the duration
/// of the mutation. Each call is atomic on its own, so a check followed by a
/// separate save is not. Use [`UrlRepository::insert_if_absent`] to claim an
/// alias in one step.
///
/// Contents live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn save_url(&self, target: &str, alias: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if let Some(previous) = data.insert(alias.to_string(), target.to_string()) {
            debug!(alias, previous = %previous, "Overwrote existing mapping");
        }
        Ok(())
    }

    async fn get_url(&self, alias: &str) -> Result<String, StoreError> {
        let data = self.data.read().await;
        data.get(alias).cloned().ok_or(StoreError::NotFound)
    }

    async fn alias_exists(&self, alias: &str) -> Result<bool, StoreError> {
        let data = self.data.read().await;
        Ok(data.contains_key(alias))
    }

    async fn insert_if_absent(&self, target: &str, alias: &str) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        match data.entry(alias.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(target.to_string());
                Ok(true)
            }
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.data.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_url_unknown_alias_is_not_found() {
        let repo = MemoryUrlRepository::new();

        let result = repo.get_url("nonexistent").await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_alias_exists_absent_is_false() {
        let repo = MemoryUrlRepository::new();

        assert!(!repo.alias_exists("nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let repo = MemoryUrlRepository::new();

        repo.save_url("https://example.com", "abcd").await.unwrap();

        assert_eq!(repo.get_url("abcd").await.unwrap(), "https://example.com");
        assert!(repo.alias_exists("abcd").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_alias() {
        let repo = MemoryUrlRepository::new();

        repo.save_url("https://first.com", "abcd").await.unwrap();
        repo.save_url("https://second.com", "abcd").await.unwrap();

        assert_eq!(repo.get_url("abcd").await.unwrap(), "https://second.com");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_if_absent_claims_free_alias() {
        let repo = MemoryUrlRepository::new();

        assert!(repo.insert_if_absent("https://example.com", "abcd").await.unwrap());
        assert_eq!(repo.get_url("abcd").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_existing_mapping() {
        let repo = MemoryUrlRepository::new();
        repo.save_url("https://first.com", "abcd").await.unwrap();

        let inserted = repo.insert_if_absent("https://second.com", "abcd").await.unwrap();

        assert!(!inserted);
        assert_eq!(repo.get_url("abcd").await.unwrap(), "https://first.com");
    }

    #[tokio::test]
    async fn test_concurrent_claims_on_one_alias_have_single_winner() {
        let repo = Arc::new(MemoryUrlRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_if_absent(&format!("https://example.com/{i}"), "same")
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
