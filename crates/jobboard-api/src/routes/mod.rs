//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 저장소 연결 확인 (readiness)
//! - `/api/auth` - 회원 가입/로그인 (공개)
//! - `/api/company` - 회사 관리 (조회 MANAGER, 쓰기 ADMIN)
//! - `/api/jobs` - 채용공고 (조회 USER, 쓰기 ADMIN)
//! - `/api/reviews` - 회사 리뷰 (조회 공개, 쓰기 ADMIN)

pub mod auth;
pub mod company;
pub mod health;
pub mod jobs;
pub mod reviews;

pub use auth::auth_router;
pub use company::company_router;
pub use health::{health_router, ComponentStatus, HealthResponse};
pub use jobs::jobs_router;
pub use reviews::reviews_router;

use axum::Router;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
/// 인증 게이트와 공통 레이어는 [`crate::create_router`]에서 적용됩니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API 엔드포인트
        .nest("/api/auth", auth_router())
        .nest("/api/company", company_router())
        .nest("/api/jobs", jobs_router())
        .nest("/api/reviews", reviews_router())
        .fallback(route_not_found)
}

/// 일치하는 라우트가 없을 때.
async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
