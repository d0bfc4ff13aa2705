//! In-process freshness cache.
//!
//! One primitive serves both caching policies the handlers need:
//! clear-until-cleared reference data goes through [`FreshnessCache::get`],
//! TTL-bound volatile data through [`FreshnessCache::get_if_fresh`]. A single
//! [`FreshnessCache::clear`] resets everything uniformly.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A cached payload paired with the instant it was computed. The two fields
/// are only ever written together, so readers never observe a half-entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    computed_at: Instant,
}

/// Key-value store of previously computed responses. Absence is a normal
/// outcome, not an error; no operation here can fail.
#[derive(Default)]
pub struct FreshnessCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl FreshnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value regardless of age.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(key).map(|e| e.value.clone())
    }

    /// Returns the cached value only while younger than `ttl`. Stale entries
    /// are ignored, not evicted; the next `put` overwrites them.
    pub async fn get_if_fresh(&self, key: &str, ttl: Duration) -> Option<Value> {
        self.get_if_fresh_at(key, ttl, Instant::now()).await
    }

    pub async fn get_if_fresh_at(&self, key: &str, ttl: Duration, now: Instant) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| now.duration_since(e.computed_at) < ttl)
            .map(|e| e.value.clone())
    }

    /// Unconditionally overwrites the entry for `key`.
    pub async fn put(&self, key: &str, value: Value) {
        self.put_at(key, value, Instant::now()).await;
    }

    pub async fn put_at(&self, key: &str, value: Value, now: Instant) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                computed_at: now,
            },
        );
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Drops only the given keys.
    pub async fn clear_keys(&self, keys: &[&str]) {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get_returns_value() {
        let cache = FreshnessCache::new();
        cache.put("years", json!([{"year_identifier": "2024"}])).await;

        assert_eq!(
            cache.get("years").await,
            Some(json!([{"year_identifier": "2024"}]))
        );
        assert_eq!(cache.get("players").await, None);
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_entry() {
        let cache = FreshnessCache::new();
        cache.put("ranking", json!([1])).await;
        cache.put("ranking", json!([1, 2])).await;

        assert_eq!(cache.get("ranking").await, Some(json!([1, 2])));
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned_within_ttl() {
        let cache = FreshnessCache::new();
        let t0 = Instant::now();
        cache.put_at("ranking", json!(["entry"]), t0).await;

        let just_under = t0 + Duration::from_secs(599);
        assert_eq!(
            cache
                .get_if_fresh_at("ranking", Duration::from_secs(600), just_under)
                .await,
            Some(json!(["entry"]))
        );
    }

    #[tokio::test]
    async fn test_stale_entry_is_ignored_but_not_evicted() {
        let cache = FreshnessCache::new();
        let t0 = Instant::now();
        cache.put_at("ranking", json!(["entry"]), t0).await;

        let expired = t0 + Duration::from_secs(601);
        assert_eq!(
            cache
                .get_if_fresh_at("ranking", Duration::from_secs(600), expired)
                .await,
            None
        );
        // get() without a TTL still sees the stale value.
        assert_eq!(cache.get("ranking").await, Some(json!(["entry"])));
    }

    #[tokio::test]
    async fn test_ttl_boundary_is_exclusive() {
        let cache = FreshnessCache::new();
        let t0 = Instant::now();
        cache.put_at("ranking", json!([]), t0).await;

        let exactly = t0 + Duration::from_secs(600);
        assert_eq!(
            cache
                .get_if_fresh_at("ranking", Duration::from_secs(600), exactly)
                .await,
            None
        );
    }

    #[tokio::test]
    async fn test_clear_drops_every_key() {
        let cache = FreshnessCache::new();
        cache.put("years", json!([])).await;
        cache.put("players", json!([])).await;
        cache.put("player:BrokenBlade", json!({})).await;

        cache.clear().await;

        assert_eq!(cache.get("years").await, None);
        assert_eq!(cache.get("players").await, None);
        assert_eq!(cache.get("player:BrokenBlade").await, None);
        assert_eq!(
            cache
                .get_if_fresh("players", Duration::from_secs(3600))
                .await,
            None
        );
    }

    #[tokio::test]
    async fn test_clear_keys_leaves_other_entries() {
        let cache = FreshnessCache::new();
        cache.put("years", json!(["a"])).await;
        cache.put("players", json!(["b"])).await;

        cache.clear_keys(&["years"]).await;

        assert_eq!(cache.get("years").await, None);
        assert_eq!(cache.get("players").await, Some(json!(["b"])));
    }

    #[tokio::test]
    async fn test_concurrent_writers_do_not_corrupt_entries() {
        use std::sync::Arc;

        let cache = Arc::new(FreshnessCache::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.put("ranking", json!([i])).await;
                cache.get("ranking").await
            }));
        }

        for handle in handles {
            let seen = handle.await.unwrap();
            // Last-write-wins: any complete value is fine, a half-entry is not.
            let value = seen.expect("entry must exist once written");
            assert!(value.as_array().is_some_and(|a| a.len() == 1));
        }
    }
}
