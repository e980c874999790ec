use std::sync::Arc;

use cache::{CacheStore, KvStore};
use config::Config;
use notify::Notifier;
use remote::RemoteSource;
use roster::RosterLoader;
use session::SessionManager;

pub mod cache;
pub mod config;
pub mod csv;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod remote;
pub mod roster;
pub mod router;
pub mod routes;
pub mod session;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn KvStore>,
        remote: RemoteSource,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cache = CacheStore::from_config(store, &config);
        let roster = RosterLoader::new(cache.clone(), remote, notifier.clone());
        let sessions = SessionManager::new(cache, roster, notifier);
        Self {
            config,
            sessions: Arc::new(sessions),
        }
    }
}
