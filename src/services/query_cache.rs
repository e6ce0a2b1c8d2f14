//! 查询结果缓存
//!
//! 以查询路由的缓存键保存上游响应，条目带有效期并限制总数。
//! 写入时若已满：先清理过期条目，仍满则淘汰最旧条目直至剩余容量的 80%

use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::config::CacheConfig;

struct CacheEntry {
    data: Value,
    stored_at: Instant,
    /// 写入序号，用于按新旧淘汰
    seq: u64,
}

/// 查询缓存
pub struct QueryCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
    enabled: bool,
    next_seq: AtomicU64,
}

impl QueryCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
            enabled: max_entries > 0,
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let mut cache = Self::new(Duration::from_secs(config.ttl_secs), config.max_entries);
        cache.enabled = config.enabled && config.max_entries > 0;
        cache
    }

    /// 读取未过期的缓存
    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.enabled {
            return None;
        }
        let entry = self.entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    /// 写入缓存
    pub fn insert(&self, key: String, data: Value) {
        if !self.enabled {
            return;
        }
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.cleanup();
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key, CacheEntry { data, stored_at: Instant::now(), seq });
    }

    /// 清理过期条目；仍然超限时淘汰最旧条目
    pub fn cleanup(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        if self.entries.len() < self.max_entries {
            return;
        }

        let keep = self.max_entries * 8 / 10;
        let mut by_age: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|e| (e.value().seq, e.key().clone()))
            .collect();
        by_age.sort_unstable();

        let evict = by_age.len().saturating_sub(keep);
        for (_, key) in by_age.into_iter().take(evict) {
            self.entries.remove(&key);
        }
        log::debug!("查询缓存淘汰 {} 条，剩余 {} 条", evict, self.entries.len());
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_and_expiry() {
        let cache = QueryCache::new(Duration::from_secs(60), 10);
        cache.insert("factors:[]".into(), json!({"data": []}));
        assert_eq!(cache.get("factors:[]"), Some(json!({"data": []})));
        assert_eq!(cache.get("themes:[]"), None);

        let expired = QueryCache::new(Duration::ZERO, 10);
        expired.insert("k".into(), json!(1));
        assert_eq!(expired.get("k"), None);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let cache = QueryCache::new(Duration::from_secs(60), 5);
        for i in 0..5 {
            cache.insert(format!("k{}", i), json!(i));
        }
        assert_eq!(cache.entries.len(), 5);

        // 满时写入：保留 80%（4 条）后再写入
        cache.insert("k5".into(), json!(5));
        assert_eq!(cache.entries.len(), 5);
        assert_eq!(cache.get("k0"), None);
        assert_eq!(cache.get("k1"), Some(json!(1)));
        assert_eq!(cache.get("k5"), Some(json!(5)));
    }

    #[test]
    fn test_expired_entries_are_purged_first() {
        let cache = QueryCache::new(Duration::ZERO, 3);
        for i in 0..3 {
            cache.insert(format!("k{}", i), json!(i));
        }
        cache.insert("k3".into(), json!(3));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = QueryCache::new(Duration::from_secs(60), 2);
        cache.insert("a".into(), json!(1));
        cache.insert("b".into(), json!(2));
        cache.insert("a".into(), json!(3));
        assert_eq!(cache.entries.len(), 2);
        assert_eq!(cache.get("a"), Some(json!(3)));
        assert_eq!(cache.get("b"), Some(json!(2)));
    }

    #[test]
    fn test_disabled_cache() {
        let config = CacheConfig { enabled: false, ttl_secs: 120, max_entries: 30 };
        let cache = QueryCache::from_config(&config);
        cache.insert("k".into(), json!(1));
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.entries.len(), 0);
    }
}
