use std::sync::Arc;
use std::time::Duration;

use super::keys::{ROSTER_DATA_KEY, ROSTER_TIME_KEY, SESSION_DATA_KEY, SESSION_TIME_KEY};
use super::store::KvStore;
use crate::config::Config;
use crate::error::StoreError;
use crate::utils::now_millis;

/// 缓存槽，每个槽由数据键和时间键组成
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Roster,
    Session,
}

impl Slot {
    fn data_key(self) -> &'static str {
        match self {
            Slot::Roster => ROSTER_DATA_KEY,
            Slot::Session => SESSION_DATA_KEY,
        }
    }

    fn time_key(self) -> &'static str {
        match self {
            Slot::Roster => ROSTER_TIME_KEY,
            Slot::Session => SESSION_TIME_KEY,
        }
    }
}

/// 未过期的缓存值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached {
    pub value: String,
    pub stored_at: i64,
    pub age: chrono::Duration,
}

/// 带时间戳的缓存操作，过期只在读取时被动判断
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KvStore>,
    roster_ttl: Duration,
    session_ttl: Duration,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KvStore>, roster_ttl: Duration, session_ttl: Duration) -> Self {
        Self {
            store,
            roster_ttl,
            session_ttl,
        }
    }

    pub fn from_config(store: Arc<dyn KvStore>, config: &Config) -> Self {
        Self::new(store, config.roster_cache_ttl(), config.session_ttl())
    }

    pub fn window(&self, slot: Slot) -> Duration {
        match slot {
            Slot::Roster => self.roster_ttl,
            Slot::Session => self.session_ttl,
        }
    }

    /// 读取缓存：过期、缺失或时间戳无效时为 Ok(None)，存储读取失败时返回错误
    pub async fn get(&self, slot: Slot) -> Result<Option<Cached>, StoreError> {
        self.get_at(slot, now_millis()).await
    }

    pub async fn get_at(&self, slot: Slot, now: i64) -> Result<Option<Cached>, StoreError> {
        let Some(raw) = self.store.get(slot.time_key()).await? else {
            return Ok(None);
        };
        let stored_at = match raw.trim().parse::<i64>() {
            Ok(ts) => ts,
            Err(_) => {
                tracing::debug!("Unparsable cache timestamp for {:?}: {}", slot, raw);
                return Ok(None);
            }
        };

        let age = chrono::Duration::milliseconds(now.saturating_sub(stored_at));
        let window_ms = i64::try_from(self.window(slot).as_millis()).unwrap_or(i64::MAX);
        if age.num_milliseconds() >= window_ms {
            tracing::debug!("Cache {:?} expired, age {}s", slot, age.num_seconds());
            return Ok(None);
        }

        Ok(self
            .store
            .get(slot.data_key())
            .await?
            .map(|value| Cached {
                value,
                stored_at,
                age,
            }))
    }

    /// 写入缓存值和时间戳（毫秒）
    pub async fn put(&self, slot: Slot, value: &str, timestamp: i64) -> Result<(), StoreError> {
        self.store.set(slot.data_key(), value).await?;
        self.store
            .set(slot.time_key(), &timestamp.to_string())
            .await?;
        Ok(())
    }

    pub async fn clear(&self, slot: Slot) -> Result<(), StoreError> {
        self.store.remove(slot.data_key()).await?;
        self.store.remove(slot.time_key()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    const MINUTE: i64 = 60 * 1000;

    fn cache_with(store: Arc<MemoryStore>) -> CacheStore {
        CacheStore::new(store, Duration::from_secs(300), Duration::from_secs(1800))
    }

    #[tokio::test]
    async fn roster_fresh_until_window_elapses() {
        let cache = cache_with(Arc::new(MemoryStore::new()));
        let now = 1_700_000_000_000;

        cache.put(Slot::Roster, "ID\n1", now - 4 * MINUTE).await.unwrap();
        let hit = cache.get_at(Slot::Roster, now).await.unwrap().unwrap();
        assert_eq!(hit.value, "ID\n1");
        assert_eq!(hit.age.num_minutes(), 4);

        assert!(cache.get_at(Slot::Roster, now + MINUTE).await.unwrap().is_none());
        assert!(cache.get_at(Slot::Roster, now + 2 * MINUTE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_window_is_thirty_minutes() {
        let cache = cache_with(Arc::new(MemoryStore::new()));
        let now = 1_700_000_000_000;

        cache.put(Slot::Session, "{}", now - 29 * MINUTE).await.unwrap();
        assert!(cache.get_at(Slot::Session, now).await.unwrap().is_some());
        assert!(cache.get_at(Slot::Session, now + MINUTE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bad_or_missing_timestamp_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(store.clone());

        store.set(ROSTER_DATA_KEY, "ID\n1").await.unwrap();
        assert!(cache.get(Slot::Roster).await.unwrap().is_none());

        store.set(ROSTER_TIME_KEY, "yesterday").await.unwrap();
        assert!(cache.get(Slot::Roster).await.unwrap().is_none());

        store.set(ROSTER_TIME_KEY, &now_millis().to_string()).await.unwrap();
        assert!(cache.get(Slot::Roster).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(store.clone());

        cache.put(Slot::Session, "{}", now_millis()).await.unwrap();
        cache.clear(Slot::Session).await.unwrap();

        assert!(store.get(SESSION_DATA_KEY).await.unwrap().is_none());
        assert!(store.get(SESSION_TIME_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_window_does_not_wrap_negative() {
        let cache = CacheStore::new(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(u64::MAX),
            Duration::from_secs(1800),
        );
        let now = 1_700_000_000_000;

        cache.put(Slot::Roster, "ID\n1", now - 365 * 24 * 60 * MINUTE).await.unwrap();
        assert!(cache.get_at(Slot::Roster, now).await.unwrap().is_some());
    }
}
