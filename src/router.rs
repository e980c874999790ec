use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{log_errors, require_session},
    routes,
};

/// 公开路由：登录、登出、数据源状态
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/students/login", post(routes::student::login))
        .route("/students/logout", post(routes::student::logout))
        .route("/roster/status", get(routes::roster::status))
}

/// 需要活动会话的路由
///
/// 服务端只保存一个活动会话，请求不携带任何客户端令牌：
/// 任何能访问服务的调用方都会拿到这个会话。这不是鉴权边界，
/// 只适用于单用户、本机部署。
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/students/me", get(routes::student::me))
        .layer(from_fn_with_state(state, require_session))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let api = public_routes().merge(protected_routes(state.clone()));
    let base = state.config.api_base_uri.trim_end_matches('/').to_string();

    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    router.layer(from_fn(log_errors)).with_state(state)
}
