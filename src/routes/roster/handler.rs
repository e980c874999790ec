use axum::{Json, extract::State};

use crate::{
    AppState,
    roster::RosterStatus,
    utils::{ApiResponse, success_to_api_response},
};

/// 远程来源是否配置，以及最近一次加载使用的数据层
#[axum::debug_handler]
pub async fn status(State(state): State<AppState>) -> Json<ApiResponse<RosterStatus>> {
    success_to_api_response(state.sessions.roster().status().await)
}
