//! Time-bounded in-memory menu memoization.
//!
//! A plain key -> entry map with lazy read-time expiry. Entries are never
//! mutated after creation; a refresh replaces the slot wholesale. Empty
//! results are deliberately not stored so a transient empty upstream
//! response cannot poison a key for the whole TTL window.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry {
    items: Vec<String>,
    created_at: Instant,
}

/// In-memory TTL cache for resolved menu item lists. No size bound: the key
/// space is schools x dates x locales, which stays small.
pub struct MenuCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl MenuCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh items for a key, or None when absent or expired. Expiry is
    /// checked here, on read; there is no eviction task.
    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        let entry = self.entries.get(key)?;
        if entry.created_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.items.clone())
    }

    /// Store a result, overwriting any stale entry. Empty results are
    /// skipped so the next read triggers a fresh attempt.
    pub fn put(&mut self, key: String, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                items,
                created_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-through helper: serve a fresh entry, otherwise run `fetch` and store
/// its non-empty result.
///
/// The lock is never held across the fetch await, so two concurrent misses
/// for the same key both fetch; whichever finishes last overwrites the slot
/// with equivalent data. That is the intended trade: no single-flight
/// machinery, idempotent overwrite.
pub async fn get_or_fetch<F, Fut, E>(
    cache: &RwLock<MenuCache>,
    key: &str,
    fetch: F,
) -> Result<Vec<String>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<String>, E>>,
{
    if let Some(items) = cache.read().await.get(key) {
        debug!("menu cache hit for {}", key);
        return Ok(items);
    }

    let items = fetch().await?;
    cache.write().await.put(key.to_string(), items.clone());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn second_read_within_ttl_skips_fetch() {
        let cache = RwLock::new(MenuCache::new(Duration::from_secs(120)));
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(items(&["Cheese Pizza"]))
        };
        let first = get_or_fetch(&cache, "k", fetch).await.unwrap();

        // Different result on a second invocation must never be observed.
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(items(&["Something Else"]))
        };
        let second = get_or_fetch(&cache, "k", fetch).await.unwrap();

        assert_eq!(first, items(&["Cheese Pizza"]));
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_fetches_again() {
        let cache = RwLock::new(MenuCache::new(Duration::ZERO));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let fetch = || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(items(&["Milk"]))
            };
            get_or_fetch(&cache, "k", fetch).await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_results_are_not_cached() {
        let cache = RwLock::new(MenuCache::new(Duration::from_secs(120)));

        let empty = get_or_fetch(&cache, "k", || async {
            Ok::<_, Infallible>(Vec::new())
        })
        .await
        .unwrap();
        assert!(empty.is_empty());
        assert!(cache.read().await.is_empty());

        let full = get_or_fetch(&cache, "k", || async {
            Ok::<_, Infallible>(items(&["Apple", "Milk"]))
        })
        .await
        .unwrap();
        assert_eq!(full, items(&["Apple", "Milk"]));
        assert_eq!(cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn fetch_error_propagates_and_stores_nothing() {
        let cache = RwLock::new(MenuCache::new(Duration::from_secs(120)));
        let result: Result<Vec<String>, &str> =
            get_or_fetch(&cache, "k", || async { Err("boom") }).await;
        assert!(result.is_err());
        assert!(cache.read().await.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = MenuCache::new(Duration::from_secs(120));
        cache.put("a".to_string(), items(&["Milk"]));
        cache.put("b".to_string(), items(&["Apple"]));
        assert_eq!(cache.get("a"), Some(items(&["Milk"])));
        assert_eq!(cache.get("b"), Some(items(&["Apple"])));
        assert_eq!(cache.get("c"), None);
    }
}
