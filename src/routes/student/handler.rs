use axum::{
    Json,
    extract::{Extension, State},
};

use super::model::{LoginRequest, StudentResponse};
use crate::{
    AppState,
    error::PortalError,
    session::Session,
    utils::{ApiResponse, success_to_api_response},
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<StudentResponse>>, PortalError> {
    let session = state.sessions.login(&req.student_id, &req.password).await?;
    Ok(success_to_api_response(session.into()))
}

#[axum::debug_handler]
pub async fn me(Extension(session): Extension<Session>) -> Json<ApiResponse<StudentResponse>> {
    success_to_api_response(session.into())
}

#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, PortalError> {
    state.sessions.logout().await?;
    Ok(success_to_api_response(()))
}
