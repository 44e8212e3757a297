//! 채용공고 endpoint.
//!
//! 조회/목록/페이지/필터는 USER, 쓰기는 ADMIN 권한이 필요합니다.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post, put},
    Router,
};

use jobboard_core::{Job, JobFilter, JobInput, Page, PageRequest, PatchDocument};

use crate::auth::{AdminAuth, UserAuth};
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{positive_id, ApiJson, ApiPath, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

// ================================================================================================
// Handlers
// ================================================================================================

/// 채용공고 등록
#[utoipa::path(
    post,
    path = "/api/jobs/addjob",
    request_body = JobInput,
    responses(
        (status = 201, description = "등록 완료", body = ApiResponse<Job>),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 404, description = "companyId의 회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn add_job(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<JobInput>,
) -> ApiResult<ApiResponse<Job>> {
    let job = state.jobs.create(input).await?;
    Ok(ApiResponse::created("Job created successfully", job))
}

/// 채용공고 단건 조회
#[utoipa::path(
    get,
    path = "/api/jobs/getJob/{id}",
    params(("id" = i64, Path, description = "채용공고 ID")),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Job>),
        (status = 404, description = "채용공고 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn get_job(
    _auth: UserAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ApiResponse<Job>> {
    let id = positive_id("Job ID", id)?;
    let job = state.jobs.get(id).await?;
    Ok(ApiResponse::ok("Job fetched successfully", job))
}

/// 전체 채용공고 목록
#[utoipa::path(
    get,
    path = "/api/jobs/getAlljobs",
    responses((status = 200, description = "조회 성공", body = ApiResponse<Vec<Job>>)),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn list_jobs(
    _auth: UserAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<Vec<Job>>> {
    let jobs = state.jobs.list().await?;
    Ok(ApiResponse::ok("Jobs fetched successfully", jobs))
}

/// 페이지 단위 목록 (ID 오름차순)
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(PageRequest),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Page<Job>>),
        (status = 400, description = "잘못된 페이지 파라미터", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn page_jobs(
    _auth: UserAuth,
    State(state): State<Arc<AppState>>,
    ApiQuery(request): ApiQuery<PageRequest>,
) -> ApiResult<ApiResponse<Page<Job>>> {
    let page = state.jobs.page(request).await?;
    Ok(ApiResponse::ok("Jobs fetched successfully", page))
}

/// 조건 필터 (모든 조건 AND)
#[utoipa::path(
    get,
    path = "/api/jobs/filter",
    params(JobFilter),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Vec<Job>>),
        (status = 400, description = "잘못된 필터 값", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn filter_jobs(
    _auth: UserAuth,
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<JobFilter>,
) -> ApiResult<ApiResponse<Vec<Job>>> {
    let jobs = state.jobs.filter(filter).await?;
    Ok(ApiResponse::ok("Jobs fetched successfully", jobs))
}

/// 채용공고 전체 수정
#[utoipa::path(
    put,
    path = "/api/jobs/updatejob/{id}",
    params(("id" = i64, Path, description = "채용공고 ID")),
    request_body = JobInput,
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Job>),
        (status = 404, description = "채용공고 또는 회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn update_job(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<JobInput>,
) -> ApiResult<ApiResponse<Job>> {
    let id = positive_id("Job ID", id)?;
    let job = state.jobs.update(id, input).await?;
    Ok(ApiResponse::ok("Job updated successfully", job))
}

/// 채용공고 부분 수정
///
/// 허용 키: title, employmentType, experienceRequired, location, postedDate, deadline,
/// contactName, contactEmail, isActive, companyId. 날짜는 `YYYY-MM-DD` 문자열입니다.
#[utoipa::path(
    patch,
    path = "/api/jobs/updatejobsomefilds/{id}",
    params(("id" = i64, Path, description = "채용공고 ID")),
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Job>),
        (status = 400, description = "알 수 없는 키 또는 잘못된 값", body = ErrorResponse),
        (status = 404, description = "채용공고 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn patch_job(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PatchDocument>,
) -> ApiResult<ApiResponse<Job>> {
    let id = positive_id("Job ID", id)?;
    let job = state.jobs.patch(id, &patch).await?;
    Ok(ApiResponse::ok("Job updated successfully", job))
}

/// 채용공고 삭제
#[utoipa::path(
    delete,
    path = "/api/jobs/deletejobById/{id}",
    params(("id" = i64, Path, description = "채용공고 ID")),
    responses(
        (status = 200, description = "삭제 완료", body = ApiResponse<String>),
        (status = 404, description = "채용공고 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "jobs"
)]
pub async fn delete_job(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    let id = positive_id("Job ID", id)?;
    state.jobs.delete(id).await?;
    Ok(ApiResponse::message("Job deleted successfully"))
}

// ================================================================================================
// Router
// ================================================================================================

pub fn jobs_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(page_jobs))
        .route("/addjob", post(add_job))
        .route("/getJob/{id}", get(get_job))
        .route("/getAlljobs", get(list_jobs))
        .route("/filter", get(filter_jobs))
        .route("/updatejob/{id}", put(update_job))
        .route("/updatejobsomefilds/{id}", patch(patch_job))
        .route("/deletejobById/{id}", delete(delete_job))
}
