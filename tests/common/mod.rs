#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use portal::cache::{CacheStore, KvStore, MemoryStore};
use portal::error::{PortalError, StoreError};
use portal::notify::{Notifier, Severity};
use portal::remote::{RemoteFetcher, RemoteSource};
use portal::roster::RosterLoader;
use portal::session::SessionManager;

pub const MINUTE_MS: i64 = 60 * 1000;

pub const ROSTER_CSV: &str = "ID,Name,Amount\n1,Alice,100\n2,Bob,abc";

/// 记录所有提示
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn has(&self, severity: Severity) -> bool {
        self.messages().iter().any(|(_, s)| *s == severity)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

/// 返回固定内容并统计调用次数
#[derive(Clone)]
pub struct StubFetcher {
    response: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self) -> Result<String, PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or_else(|| PortalError::FetchUnavailable("stub offline".to_string()))
    }
}

/// 可按需让读或写失败的内存存储
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.remove(key).await
    }
}

pub fn cache_store(store: Arc<dyn KvStore>) -> CacheStore {
    CacheStore::new(store, Duration::from_secs(300), Duration::from_secs(1800))
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub cache: CacheStore,
    pub notifier: Arc<RecordingNotifier>,
    pub fetcher: StubFetcher,
}

impl Harness {
    pub fn new(fetcher: StubFetcher) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            cache: cache_store(store.clone()),
            store,
            notifier: Arc::new(RecordingNotifier::default()),
            fetcher,
        }
    }

    pub fn loader(&self) -> RosterLoader {
        RosterLoader::new(
            self.cache.clone(),
            RemoteSource::fetcher(self.fetcher.clone()),
            self.notifier.clone(),
        )
    }

    pub fn sessions(&self, loader: RosterLoader) -> SessionManager {
        SessionManager::new(self.cache.clone(), loader, self.notifier.clone())
    }
}
