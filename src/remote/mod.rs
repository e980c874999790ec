//! 远程花名册拉取
//!
//! 远程来源可能不存在（未配置凭据），用 [`RemoteSource::Unavailable`] 表示，
//! 而不是在运行时探测客户端是否存在。

mod drive;

pub use drive::DriveFetcher;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::PortalError;

/// 拉取原始 CSV 文本；所有失败都以 `PortalError::FetchUnavailable` 返回
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String, PortalError>;
}

#[derive(Clone)]
pub enum RemoteSource {
    Unavailable,
    Fetcher(Arc<dyn RemoteFetcher>),
}

impl RemoteSource {
    pub fn fetcher(fetcher: impl RemoteFetcher + 'static) -> Self {
        RemoteSource::Fetcher(Arc::new(fetcher))
    }

    /// 凭据齐全时使用云盘导出接口，否则不启用远程来源
    pub fn from_config(config: &Config) -> Self {
        let Some((file_id, api_key)) = config.drive_credentials() else {
            tracing::info!("Drive credentials not configured, remote roster disabled");
            return RemoteSource::Unavailable;
        };

        match DriveFetcher::new(
            &config.drive_api_base,
            file_id,
            api_key,
            config.drive_timeout(),
        ) {
            Ok(fetcher) => RemoteSource::fetcher(fetcher),
            Err(e) => {
                tracing::error!("Failed to build drive client: {}", e);
                RemoteSource::Unavailable
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, RemoteSource::Fetcher(_))
    }

    /// 单次尝试，不重试
    pub async fn fetch(&self) -> Result<String, PortalError> {
        match self {
            RemoteSource::Unavailable => Err(PortalError::FetchUnavailable(
                "no remote source configured".to_string(),
            )),
            RemoteSource::Fetcher(fetcher) => fetcher.fetch().await,
        }
    }
}
