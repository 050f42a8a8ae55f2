//! Revalidating Cache
//!
//! Serves a computed value until it is older than the revalidation interval,
//! then recomputes it on the next request. Only successes are stored: a
//! failed recomputation reaches the caller and the next request tries again.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

pub struct RevalidatingCache<K, V> {
    revalidate_after: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> RevalidatingCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(revalidate_after: Duration) -> Self {
        Self {
            revalidate_after,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.revalidate_after)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        let entry = Entry {
            value,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Fresh cached value, or the result of `fetch` (cached on success)
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_serves_cached_until_stale() {
        let cache = RevalidatingCache::new(Duration::from_secs(60));
        let counter = AtomicUsize::new(0);
        let fetches = &counter;
        let fetch = move || async move {
            let n = fetches.fetch_add(1, Ordering::SeqCst) + 1;
            Ok::<_, ()>(n)
        };

        assert_eq!(cache.get_or_fetch("catalog", fetch).await, Ok(1));
        assert_eq!(cache.get_or_fetch("catalog", fetch).await, Ok(1));

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(cache.get_or_fetch("catalog", fetch).await, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_not_cached() {
        let cache: RevalidatingCache<&str, u32> = RevalidatingCache::new(Duration::from_secs(60));

        let failed = cache.get_or_fetch("catalog", || async { Err("provider down") }).await;
        assert_eq!(failed, Err("provider down"));
        assert_eq!(cache.get(&"catalog").await, None);

        let recovered = cache.get_or_fetch("catalog", || async { Ok::<_, &str>(7) }).await;
        assert_eq!(recovered, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let cache = RevalidatingCache::new(Duration::from_secs(60));
        cache.insert("prod_a".to_string(), "Camiseta A").await;

        assert_eq!(cache.get(&"prod_a".to_string()).await, Some("Camiseta A"));
        assert_eq!(cache.get(&"prod_b".to_string()).await, None);
    }
}
