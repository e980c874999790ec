use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::PortalError};

/// 要求存在未过期的会话，并把会话放入请求扩展；存储读取失败时返回服务器错误
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, PortalError> {
    let session = state
        .sessions
        .current()
        .await?
        .ok_or(PortalError::Unauthorized)?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
