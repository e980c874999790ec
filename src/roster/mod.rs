//! 花名册加载
//!
//! 依次尝试：未过期的缓存、远程拉取、内置示例数据。加载本身从不失败，
//! 远程不可用时退回示例数据并发出警告提示，不做重试。

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::{CacheStore, Slot};
use crate::csv::{self, Record};
use crate::notify::{Notifier, Severity};
use crate::remote::RemoteSource;
use crate::utils::now_millis;

/// 内置示例花名册
pub const SAMPLE_ROSTER: &str = include_str!("../../data/sample_roster.csv");

const SAMPLE_FALLBACK_MESSAGE: &str = "Failed to load data. Using sample data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterSource {
    Cache,
    Remote,
    Sample,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterStatus {
    pub remote_configured: bool,
    pub last_source: Option<RosterSource>,
}

pub struct RosterLoader {
    cache: CacheStore,
    remote: RemoteSource,
    notifier: Arc<dyn Notifier>,
    sample: Cow<'static, str>,
    last_source: RwLock<Option<RosterSource>>,
}

impl RosterLoader {
    pub fn new(cache: CacheStore, remote: RemoteSource, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            cache,
            remote,
            notifier,
            sample: Cow::Borrowed(SAMPLE_ROSTER),
            last_source: RwLock::new(None),
        }
    }

    /// 替换示例数据
    pub fn with_sample(mut self, sample: impl Into<Cow<'static, str>>) -> Self {
        self.sample = sample.into();
        self
    }

    pub async fn load(&self) -> Vec<Record> {
        self.load_with_source().await.0
    }

    pub async fn load_with_source(&self) -> (Vec<Record>, RosterSource) {
        let (records, source) = self.resolve().await;
        *self.last_source.write().await = Some(source);
        tracing::debug!("Loaded {} roster records from {:?}", records.len(), source);
        (records, source)
    }

    async fn resolve(&self) -> (Vec<Record>, RosterSource) {
        match self.cache.get(Slot::Roster).await {
            Ok(Some(cached)) => {
                tracing::debug!("Using cached roster, age {}s", cached.age.num_seconds());
                return (csv::parse(&cached.value), RosterSource::Cache);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read cached roster: {}", e),
        }

        match self.remote.fetch().await {
            Ok(text) if !text.trim().is_empty() => {
                if let Err(e) = self.cache.put(Slot::Roster, &text, now_millis()).await {
                    tracing::warn!("Failed to cache roster: {}", e);
                }
                (csv::parse(&text), RosterSource::Remote)
            }
            Ok(_) => {
                tracing::warn!("Remote roster was empty");
                self.fallback()
            }
            Err(e) => {
                tracing::warn!("Remote roster unavailable: {}", e);
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> (Vec<Record>, RosterSource) {
        self.notifier.notify(SAMPLE_FALLBACK_MESSAGE, Severity::Warning);
        (csv::parse(&self.sample), RosterSource::Sample)
    }

    pub async fn status(&self) -> RosterStatus {
        RosterStatus {
            remote_configured: self.remote.is_configured(),
            last_source: *self.last_source.read().await,
        }
    }
}
