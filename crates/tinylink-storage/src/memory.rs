use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};
use tinylink_core::repository::{ReadRepository, RecordId, Repository, Result, UrlRecord};
use tinylink_core::{ShortCode, StorageError};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Inserts go through the entry API, so the presence check and the write
/// happen under the same shard lock and concurrent inserts of one code
/// cannot both succeed.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<RecordId> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => {
                trace!(code = %code, "short code already taken");
                Err(StorageError::Conflict(code.to_string()))
            }
            Entry::Vacant(slot) => {
                let id = RecordId(self.next_id.fetch_add(1, Ordering::Relaxed));
                slot.insert(UrlRecord {
                    id,
                    short_code: code.clone(),
                    original_url: original_url.to_owned(),
                    created_at: Timestamp::now(),
                });
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let id = repo
            .insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let record = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.short_code, code("abc123"));
        assert_eq!(record.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_first_mapping() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::Conflict("abc123".to_string()));

        let record = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn codes_are_case_sensitive() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abcDEF"), "https://one.example")
            .await
            .unwrap();
        repo.insert(&code("ABCdef"), "https://two.example")
            .await
            .unwrap();

        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let repo = InMemoryRepository::new();

        let first = repo.insert(&code("aaaaaa"), "https://a.example").await.unwrap();
        let second = repo.insert(&code("bbbbbb"), "https://b.example").await.unwrap();

        assert_eq!(first, RecordId(1));
        assert_eq!(second, RecordId(2));
    }

    #[tokio::test]
    async fn exists_checks() {
        let repo = InMemoryRepository::new();

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
        assert!(!repo.exists(&code("abc124")).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_same_code_admit_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..32u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&code("same00"), &format!("https://example{}.com", i))
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(err) => assert!(matches!(err, StorageError::Conflict(_))),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_distinct_inserts_get_distinct_ids() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..50u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&code(&format!("code{:03}", i)), "https://example.com")
                    .await
                    .unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 50);
    }
}
