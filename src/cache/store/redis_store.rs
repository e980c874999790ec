use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, aio::MultiplexedConnection};

use super::KvStore;
use crate::error::StoreError;

/// Redis 存储，过期由缓存层按时间戳判断，这里不设置 TTL
#[derive(Clone)]
pub struct RedisStore {
    redis: Arc<RedisClient>,
}

impl RedisStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    pub fn open(url: &str) -> Result<Self, StoreError> {
        let client = RedisClient::open(url)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// 连接失败视为存储不可用，命令执行错误保留为 Redis 错误
    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        self.redis
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let result: Option<String> = conn.get(key).await?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
