mod common;

use std::sync::Arc;

use common::{FlakyStore, ROSTER_CSV, RecordingNotifier, StubFetcher, cache_store};
use portal::cache::{CacheStore, KvStore, Slot};
use portal::error::PortalError;
use portal::notify::Severity;
use portal::remote::RemoteSource;
use portal::roster::{RosterLoader, RosterSource};
use portal::session::SessionManager;

struct Setup {
    store: Arc<FlakyStore>,
    cache: CacheStore,
    notifier: Arc<RecordingNotifier>,
    fetcher: StubFetcher,
    sessions: SessionManager,
}

fn setup() -> Setup {
    let store = Arc::new(FlakyStore::default());
    let cache = cache_store(store.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let fetcher = StubFetcher::returning(ROSTER_CSV);
    let loader = RosterLoader::new(
        cache.clone(),
        RemoteSource::fetcher(fetcher.clone()),
        notifier.clone(),
    );
    let sessions = SessionManager::new(cache.clone(), loader, notifier.clone());
    Setup {
        store,
        cache,
        notifier,
        fetcher,
        sessions,
    }
}

#[tokio::test]
async fn transient_read_error_keeps_session() {
    let setup = setup();
    let alice = setup.sessions.login("1", "x").await.unwrap();

    setup.store.fail_reads(true);
    let err = setup.sessions.current().await.unwrap_err();
    assert!(matches!(err, PortalError::Store(_)));

    setup.store.fail_reads(false);
    assert_eq!(setup.sessions.current().await.unwrap(), Some(alice));
    assert!(setup.store.get("currentStudent").await.unwrap().is_some());
    assert!(setup.cache.get(Slot::Session).await.unwrap().is_some());
}

#[tokio::test]
async fn restore_read_error_does_not_clear_persisted_session() {
    let setup = setup();
    setup.sessions.login("1", "x").await.unwrap();

    setup.store.fail_reads(true);
    assert!(setup.sessions.restore().await.is_err());

    setup.store.fail_reads(false);
    assert!(setup.sessions.restore().await.unwrap().is_some());
}

#[tokio::test]
async fn failed_session_write_reports_login_failure() {
    let setup = setup();
    setup.store.fail_writes(true);

    let err = setup.sessions.login("1", "x").await.unwrap_err();
    assert!(matches!(err, PortalError::Store(_)));

    let (message, severity) = setup.notifier.messages().last().cloned().unwrap();
    assert!(message.starts_with("Login failed:"));
    assert_eq!(severity, Severity::Error);
    assert!(!setup.notifier.has(Severity::Success));
    assert!(setup.sessions.current().await.unwrap().is_none());
}

#[tokio::test]
async fn roster_read_error_falls_through_to_remote() {
    let setup = setup();
    setup.store.fail_reads(true);

    let (records, source) = setup.sessions.roster().load_with_source().await;

    assert_eq!(source, RosterSource::Remote);
    assert_eq!(records.len(), 2);
    assert_eq!(setup.fetcher.calls(), 1);
}
