//! 잡보드 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회사, 채용공고, 리뷰, 회원 가입/로그인)
//! - Bearer 토큰 인증과 역할 기반 접근 제어
//! - PostgreSQL / 메모리 저장소
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰 인증 및 권한 관리
//! - [`services`]: 리소스별 규칙 (검증, NotFound 변환)
//! - [`repository`]: 저장소 trait과 구현
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use jobboard_core::ServerConfig;

pub use auth::{authenticate, Principal, TokenService};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use metrics::setup_metrics_recorder;
pub use middleware::{metrics_layer, translate_errors};
pub use response::ApiResponse;
pub use routes::create_api_router;
pub use state::AppState;

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// CORS 레이어 생성.
///
/// 허용 origin이 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origin_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let restricted = !origins.is_empty();
    let allow_origin = if restricted {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    } else {
        warn!("CORS origins not set, allowing any origin (development mode)");
        AllowOrigin::any()
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        // 와일드카드 origin과 함께 쓸 수 없음
        .allow_credentials(restricted)
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
///
/// 레이어 순서 (바깥 → 안쪽): CORS, Trace, metrics, 에러 정규화, 타임아웃, 패닉 처리.
pub fn create_router(
    state: Arc<AppState>,
    server: &ServerConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let api_router = create_api_router()
        .layer(axum_middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state);

    let mut router = Router::new()
        .merge(api_router)
        // OpenAPI 문서 및 Swagger UI
        .merge(openapi::swagger_ui_router());

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(handle),
        );
    }

    router
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(axum_middleware::from_fn(translate_errors))
        .layer(axum_middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}
