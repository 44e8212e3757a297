//! 회사 endpoint.
//!
//! 조회는 MANAGER, 쓰기는 ADMIN 권한이 필요합니다.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post, put},
    Router,
};

use jobboard_core::{Company, CompanyInput, PatchDocument};

use crate::auth::{AdminAuth, ManagerAuth};
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{positive_id, ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

// ================================================================================================
// Handlers
// ================================================================================================

/// 회사 등록
#[utoipa::path(
    post,
    path = "/api/company/addcompany",
    request_body = CompanyInput,
    responses(
        (status = 201, description = "등록 완료", body = ApiResponse<Company>),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 401, description = "인증 필요", body = ErrorResponse),
        (status = 403, description = "ADMIN 권한 필요", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn add_company(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CompanyInput>,
) -> ApiResult<ApiResponse<Company>> {
    let company = state.companies.create(input).await?;
    Ok(ApiResponse::created("Company created successfully", company))
}

/// 회사 단건 조회
#[utoipa::path(
    get,
    path = "/api/company/getCompany/{id}",
    params(("id" = i64, Path, description = "회사 ID")),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Company>),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn get_company(
    _auth: ManagerAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ApiResponse<Company>> {
    let id = positive_id("Company ID", id)?;
    let company = state.companies.get(id).await?;
    Ok(ApiResponse::ok("Company fetched successfully", company))
}

/// 전체 회사 목록
#[utoipa::path(
    get,
    path = "/api/company/getallCompany",
    responses((status = 200, description = "조회 성공", body = ApiResponse<Vec<Company>>)),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn list_companies(
    _auth: ManagerAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<Vec<Company>>> {
    let companies = state.companies.list().await?;
    Ok(ApiResponse::ok("Companies fetched successfully", companies))
}

/// 회사 전체 수정
#[utoipa::path(
    put,
    path = "/api/company/updatecompany/{id}",
    params(("id" = i64, Path, description = "회사 ID")),
    request_body = CompanyInput,
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Company>),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn update_company(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<CompanyInput>,
) -> ApiResult<ApiResponse<Company>> {
    let id = positive_id("Company ID", id)?;
    let company = state.companies.update(id, input).await?;
    Ok(ApiResponse::ok("Company updated successfully", company))
}

/// 회사 부분 수정
///
/// 본문은 필드 이름 → 새 값 JSON 객체입니다. 허용 키: name, description, websiteUrl,
/// email, phoneNumber, address, industry, foundedYear, employeeCount, isActive.
#[utoipa::path(
    patch,
    path = "/api/company/updateCompanySomefileds/{id}",
    params(("id" = i64, Path, description = "회사 ID")),
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Company>),
        (status = 400, description = "알 수 없는 키 또는 잘못된 값", body = ErrorResponse),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn patch_company(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PatchDocument>,
) -> ApiResult<ApiResponse<Company>> {
    let id = positive_id("Company ID", id)?;
    let company = state.companies.patch(id, &patch).await?;
    Ok(ApiResponse::ok("Company updated successfully", company))
}

/// 회사 삭제 (소속 채용공고/리뷰 포함)
#[utoipa::path(
    delete,
    path = "/api/company/delete/{id}",
    params(("id" = i64, Path, description = "회사 ID")),
    responses(
        (status = 200, description = "삭제 완료", body = ApiResponse<String>),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "company"
)]
pub async fn delete_company(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    let id = positive_id("Company ID", id)?;
    state.companies.delete(id).await?;
    Ok(ApiResponse::message("Company deleted successfully"))
}

// ================================================================================================
// Router
// ================================================================================================

pub fn company_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addcompany", post(add_company))
        .route("/getCompany/{id}", get(get_company))
        .route("/getallCompany", get(list_companies))
        .route("/updatecompany/{id}", put(update_company))
        .route("/updateCompanySomefileds/{id}", patch(patch_company))
        .route("/delete/{id}", delete(delete_company))
}
