//! 회원 가입/로그인 endpoint.
//!
//! 두 엔드포인트 모두 인증 없이 접근할 수 있습니다.

use std::sync::Arc;

use axum::{extract::State, routing::post, Router};

use crate::error::{ApiResult, ErrorResponse};
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::services::{LoginRequest, RegisterRequest, RegisteredUser};
use crate::state::AppState;

// ================================================================================================
// Handlers
// ================================================================================================

/// 회원 가입
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 완료", body = ApiResponse<RegisteredUser>),
        (status = 400, description = "검증 실패 또는 중복 사용자", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<ApiResponse<RegisteredUser>> {
    let user = state.accounts.register(request).await?;
    Ok(ApiResponse::created("User registered successfully", user))
}

/// 로그인. 성공 시 `data`가 Bearer 토큰입니다.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "토큰 발급", body = ApiResponse<String>),
        (status = 401, description = "자격 증명 불일치", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<ApiResponse<String>> {
    let token = state.accounts.login(request).await?;
    Ok(ApiResponse::ok("Login successful", token))
}

// ================================================================================================
// Router
// ================================================================================================

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
