use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::RemoteFetcher;
use crate::error::PortalError;

const CSV_MIME_TYPE: &str = "text/csv";

/// 通过云盘文件导出接口拉取 CSV
#[derive(Debug, Clone)]
pub struct DriveFetcher {
    client: Client,
    export_url: String,
    api_key: String,
}

impl DriveFetcher {
    pub fn new(
        api_base: &str,
        file_id: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            export_url: format!(
                "{}/drive/v3/files/{}/export",
                api_base.trim_end_matches('/'),
                file_id
            ),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl RemoteFetcher for DriveFetcher {
    async fn fetch(&self) -> Result<String, PortalError> {
        let response = self
            .client
            .get(&self.export_url)
            .query(&[("mimeType", CSV_MIME_TYPE), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Drive export request failed: {}", e);
                PortalError::FetchUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Drive export returned {}", status);
            return Err(PortalError::FetchUnavailable(format!(
                "drive export returned {}",
                status
            )));
        }

        response.text().await.map_err(|e| {
            tracing::error!("Failed to read drive export body: {}", e);
            PortalError::FetchUnavailable(e.to_string())
        })
    }
}
