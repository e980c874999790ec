use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::Session;
use crate::cache::{CacheStore, Slot};
use crate::error::PortalError;
use crate::notify::{Notifier, Severity};
use crate::roster::RosterLoader;
use crate::utils::now_millis;

/// 会话管理：登录、恢复、登出，同一时间只有一个活动会话
pub struct SessionManager {
    cache: CacheStore,
    roster: RosterLoader,
    notifier: Arc<dyn Notifier>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new(cache: CacheStore, roster: RosterLoader, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            cache,
            roster,
            notifier,
            current: RwLock::new(None),
        }
    }

    pub fn roster(&self) -> &RosterLoader {
        &self.roster
    }

    /// 按标识查找学生并建立会话；密码不做校验
    pub async fn login(&self, identifier: &str, _password: &str) -> Result<Session, PortalError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(self.report(PortalError::InvalidIdentifier, Severity::Warning));
        }

        let records = self.roster.load().await;
        if records.is_empty() {
            return Err(self.report(PortalError::NoData, Severity::Error));
        }

        let Some(record) = records
            .iter()
            .find(|record| Session::matches(record, identifier))
        else {
            tracing::info!("Login rejected, unknown identifier: {}", identifier);
            return Err(self.report(
                PortalError::NotFound(identifier.to_string()),
                Severity::Error,
            ));
        };

        let session = Session::from_record(record, identifier);
        if let Err(e) = self.persist(&session).await {
            tracing::error!("Failed to persist session for {}: {}", session.id, e);
            self.notifier.notify(&format!("Login failed: {}", e), Severity::Error);
            return Err(e);
        }
        *self.current.write().await = Some(session.clone());

        tracing::info!("Student {} logged in", session.id);
        self.notifier.notify("Login successful!", Severity::Success);
        Ok(session)
    }

    /// 恢复已保存的会话，过期或损坏时清除；存储读取失败时保留当前状态并返回错误
    pub async fn restore(&self) -> Result<Option<Session>, PortalError> {
        let cached = match self.cache.get(Slot::Session).await {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {}", e);
                return Err(e.into());
            }
        };

        let restored = match cached {
            Some(cached) => match serde_json::from_str::<Session>(&cached.value) {
                Ok(session) => {
                    tracing::debug!(
                        "Restored session for {}, age {}s",
                        session.id,
                        cached.age.num_seconds()
                    );
                    Some(session)
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable session: {}", e);
                    None
                }
            },
            None => None,
        };

        if restored.is_none() {
            self.expire().await;
        }
        *self.current.write().await = restored.clone();
        Ok(restored)
    }

    /// 当前活动会话，超过会话时限则视为已登出
    pub async fn current(&self) -> Result<Option<Session>, PortalError> {
        if self.current.read().await.is_none() {
            return Ok(None);
        }
        self.restore().await
    }

    pub async fn logout(&self) -> Result<(), PortalError> {
        *self.current.write().await = None;
        self.cache.clear(Slot::Session).await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    async fn persist(&self, session: &Session) -> Result<(), PortalError> {
        let json = serde_json::to_string(session)?;
        self.cache.put(Slot::Session, &json, now_millis()).await?;
        Ok(())
    }

    async fn expire(&self) {
        if let Err(e) = self.cache.clear(Slot::Session).await {
            tracing::warn!("Failed to clear expired session: {}", e);
        }
    }

    fn report(&self, error: PortalError, severity: Severity) -> PortalError {
        self.notifier.notify(&error.to_string(), severity);
        error
    }
}
