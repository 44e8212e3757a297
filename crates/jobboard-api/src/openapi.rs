//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use jobboard_core::{Company, CompanyInput, Job, JobInput, Review, ReviewInput, RoleType};

use crate::error::ErrorResponse;
use crate::routes::{ComponentStatus, HealthResponse};
use crate::services::{LoginRequest, RegisterRequest, RegisteredUser};

// ==================== OpenAPI 문서 정의 ====================

/// JobBoard API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "JobBoard API",
        version = "0.1.0",
        description = r#"
# JobBoard REST API

회사, 채용공고, 회사 리뷰를 관리하는 REST API입니다.

## 인증

`POST /api/auth/login`으로 발급받은 토큰을 `Authorization: Bearer <token>` 헤더에 포함하세요.

| 리소스 | 조회 | 쓰기 |
|---|---|---|
| 회사 | MANAGER | ADMIN |
| 채용공고 | USER | ADMIN |
| 리뷰 | 공개 | ADMIN |

역할 사이에 상속은 없습니다 (ADMIN만 가진 사용자는 MANAGER 조회를 통과하지 못합니다).
"#
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 회원 가입 및 로그인"),
        (name = "company", description = "회사 - 회사 CRUD 및 연쇄 삭제"),
        (name = "jobs", description = "채용공고 - CRUD, 페이지, 필터"),
        (name = "reviews", description = "리뷰 - 회사별 리뷰 CRUD")
    ),
    modifiers(&SecurityAddon),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentStatus,

            // ===== Common =====
            ErrorResponse,
            RoleType,

            // ===== Auth =====
            RegisterRequest,
            LoginRequest,
            RegisteredUser,

            // ===== Resources =====
            Company,
            CompanyInput,
            Job,
            JobInput,
            Review,
            ReviewInput,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,

        // ===== Company =====
        crate::routes::company::add_company,
        crate::routes::company::get_company,
        crate::routes::company::list_companies,
        crate::routes::company::update_company,
        crate::routes::company::patch_company,
        crate::routes::company::delete_company,

        // ===== Jobs =====
        crate::routes::jobs::add_job,
        crate::routes::jobs::get_job,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::page_jobs,
        crate::routes::jobs::filter_jobs,
        crate::routes::jobs::update_job,
        crate::routes::jobs::patch_job,
        crate::routes::jobs::delete_job,

        // ===== Reviews =====
        crate::routes::reviews::add_review,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::get_review,
        crate::routes::reviews::update_review,
        crate::routes::reviews::patch_review,
        crate::routes::reviews::delete_review,
    )
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================
