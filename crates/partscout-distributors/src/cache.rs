//! In-memory TTL cache for decoded distributor responses.
//!
//! Expired entries are evicted lazily by [`ResponseCache::get`]; there is no
//! background sweep.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct ResponseCache {
    default_ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` unless it is missing or expired.
    /// An expired entry is removed before reporting the miss.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` with an absolute expiry of now + `ttl` (or the default TTL).
    pub async fn set(&self, key: impl Into<String>, value: serde_json::Value, ttl: Option<Duration>) {
        let expires_at = Instant::now() + ttl.unwrap_or(self.default_ttl);
        self.entries
            .lock()
            .await
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Builds a stable cache key from everything that identifies a request.
///
/// The parts are encoded as one JSON array, so string contents are escaped
/// and two distinct requests always produce distinct keys. Query pairs keep
/// the order given.
#[must_use]
pub fn cache_key(
    method: &reqwest::Method,
    url: &str,
    query: &[(String, String)],
    body: Option<&serde_json::Value>,
) -> String {
    serde_json::json!([method.as_str(), url, query, body]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_on_empty_cache_misses() {
        let cache = ResponseCache::new(Duration::from_secs(3600));
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_exact_value() {
        let cache = ResponseCache::new(Duration::from_secs(3600));
        cache.set("key", json!({"x": 1}), None).await;
        assert_eq!(cache.get("key").await, Some(json!({"x": 1})));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_evicted_on_get() {
        let cache = ResponseCache::new(Duration::from_secs(3600));
        cache
            .set("key", json!("v"), Some(Duration::from_secs(1)))
            .await;
        assert_eq!(cache.get("key").await, Some(json!("v")));
        assert_eq!(cache.len().await, 1);

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!(cache.get("key").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn default_ttl_applies_when_unspecified() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.set("key", json!(true), None).await;
        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.get("key").await.is_some());
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("a", json!(1), None).await;
        cache.set("b", json!(2), None).await;
        assert_eq!(cache.len().await, 2);
        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[test]
    fn cache_key_is_stable_and_order_sensitive() {
        let q1 = vec![("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2".to_owned())];
        let q2 = vec![("b".to_owned(), "2".to_owned()), ("a".to_owned(), "1".to_owned())];
        let url = "https://api.example.com/search";
        let k1 = cache_key(&reqwest::Method::GET, url, &q1, None);
        assert_eq!(k1, cache_key(&reqwest::Method::GET, url, &q1, None));
        assert_ne!(k1, cache_key(&reqwest::Method::GET, url, &q2, None));
    }

    #[test]
    fn cache_key_distinguishes_body_and_method() {
        let url = "https://api.example.com/search";
        let a = cache_key(&reqwest::Method::POST, url, &[], Some(&json!({"k": "LM2596"})));
        let b = cache_key(&reqwest::Method::POST, url, &[], Some(&json!({"k": "TPS54360"})));
        let c = cache_key(&reqwest::Method::GET, url, &[], None);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn cache_key_survives_separators_inside_values() {
        let url = "https://api.example.com/search";
        let smuggled = vec![("a".to_owned(), "1\nb=2".to_owned())];
        let split = vec![("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2".to_owned())];
        assert_ne!(
            cache_key(&reqwest::Method::GET, url, &smuggled, None),
            cache_key(&reqwest::Method::GET, url, &split, None)
        );

        let in_query = vec![("q".to_owned(), "x\n\n{}".to_owned())];
        let in_body = vec![("q".to_owned(), "x".to_owned())];
        assert_ne!(
            cache_key(&reqwest::Method::POST, url, &in_query, None),
            cache_key(&reqwest::Method::POST, url, &in_body, Some(&json!({})))
        );
    }
}
