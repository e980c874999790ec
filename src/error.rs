use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

/// 键值存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum PortalError {
    /// 远程拉取失败或返回空内容，只在花名册加载内部使用
    #[error("remote roster unavailable: {0}")]
    FetchUnavailable(String),

    #[error("No student data found in system")]
    NoData,

    #[error("Student ID not found in system")]
    NotFound(String),

    #[error("Please enter your Student ID")]
    InvalidIdentifier,

    #[error("No active session")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PortalError {
    pub fn code(&self) -> i32 {
        match self {
            PortalError::InvalidIdentifier => error_codes::VALIDATION_ERROR,
            PortalError::Unauthorized => error_codes::AUTH_FAILED,
            PortalError::NotFound(_) => error_codes::NOT_FOUND,
            PortalError::NoData => error_codes::NO_DATA,
            PortalError::FetchUnavailable(_)
            | PortalError::Store(_)
            | PortalError::Serialization(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match self {
            PortalError::FetchUnavailable(_)
            | PortalError::Store(_)
            | PortalError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        };

        (status, error_to_api_response::<()>(self.code(), self.to_string())).into_response()
    }
}
