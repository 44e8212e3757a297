//! 회사 리뷰 endpoint.
//!
//! 조회는 공개, 쓰기는 ADMIN 권한이 필요합니다.

use std::sync::Arc;

use axum::{extract::State, routing::get, routing::post, Router};

use jobboard_core::{PatchDocument, Review, ReviewInput};

use crate::auth::AdminAuth;
use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{positive_id, ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

fn ids(company_id: i64, review_id: i64) -> ApiResult<(i64, i64)> {
    Ok((
        positive_id("Company ID", company_id)?,
        positive_id("Review ID", review_id)?,
    ))
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 리뷰 등록
#[utoipa::path(
    post,
    path = "/api/reviews/company/{companyId}/addreview",
    params(("companyId" = i64, Path, description = "회사 ID")),
    request_body = ReviewInput,
    responses(
        (status = 201, description = "등록 완료", body = ApiResponse<Review>),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn add_review(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath(company_id): ApiPath<i64>,
    ApiJson(input): ApiJson<ReviewInput>,
) -> ApiResult<ApiResponse<Review>> {
    let company_id = positive_id("Company ID", company_id)?;
    let review = state.reviews.create(company_id, input).await?;
    Ok(ApiResponse::created("Review added successfully", review))
}

/// 회사의 리뷰 목록
#[utoipa::path(
    get,
    path = "/api/reviews/company/{companyId}/review",
    params(("companyId" = i64, Path, description = "회사 ID")),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Vec<Review>>),
        (status = 404, description = "회사 없음", body = ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(company_id): ApiPath<i64>,
) -> ApiResult<ApiResponse<Vec<Review>>> {
    let company_id = positive_id("Company ID", company_id)?;
    let reviews = state.reviews.list(company_id).await?;
    Ok(ApiResponse::ok("Reviews fetched successfully", reviews))
}

/// 리뷰 단건 조회
#[utoipa::path(
    get,
    path = "/api/reviews/company/{companyId}/review/{reviewId}",
    params(
        ("companyId" = i64, Path, description = "회사 ID"),
        ("reviewId" = i64, Path, description = "리뷰 ID")
    ),
    responses(
        (status = 200, description = "조회 성공", body = ApiResponse<Review>),
        (status = 404, description = "회사 또는 리뷰 없음", body = ErrorResponse)
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    ApiPath((company_id, review_id)): ApiPath<(i64, i64)>,
) -> ApiResult<ApiResponse<Review>> {
    let (company_id, review_id) = ids(company_id, review_id)?;
    let review = state.reviews.get(company_id, review_id).await?;
    Ok(ApiResponse::ok("Review fetched successfully", review))
}

/// 리뷰 전체 수정
#[utoipa::path(
    put,
    path = "/api/reviews/company/{companyId}/review/{reviewId}",
    params(
        ("companyId" = i64, Path, description = "회사 ID"),
        ("reviewId" = i64, Path, description = "리뷰 ID")
    ),
    request_body = ReviewInput,
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Review>),
        (status = 404, description = "회사 또는 리뷰 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn update_review(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath((company_id, review_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<ReviewInput>,
) -> ApiResult<ApiResponse<Review>> {
    let (company_id, review_id) = ids(company_id, review_id)?;
    let review = state.reviews.update(company_id, review_id, input).await?;
    Ok(ApiResponse::ok("Review updated successfully", review))
}

/// 리뷰 부분 수정
///
/// 허용 키: reviewerName, rating, comment.
#[utoipa::path(
    patch,
    path = "/api/reviews/company/{companyId}/review/{reviewId}",
    params(
        ("companyId" = i64, Path, description = "회사 ID"),
        ("reviewId" = i64, Path, description = "리뷰 ID")
    ),
    responses(
        (status = 200, description = "수정 완료", body = ApiResponse<Review>),
        (status = 400, description = "알 수 없는 키 또는 잘못된 값", body = ErrorResponse),
        (status = 404, description = "회사 또는 리뷰 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn patch_review(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath((company_id, review_id)): ApiPath<(i64, i64)>,
    ApiJson(patch): ApiJson<PatchDocument>,
) -> ApiResult<ApiResponse<Review>> {
    let (company_id, review_id) = ids(company_id, review_id)?;
    let review = state.reviews.patch(company_id, review_id, &patch).await?;
    Ok(ApiResponse::ok("Review updated successfully", review))
}

/// 리뷰 삭제
#[utoipa::path(
    delete,
    path = "/api/reviews/company/{companyId}/review/{reviewId}",
    params(
        ("companyId" = i64, Path, description = "회사 ID"),
        ("reviewId" = i64, Path, description = "리뷰 ID")
    ),
    responses(
        (status = 200, description = "삭제 완료", body = ApiResponse<String>),
        (status = 404, description = "회사 또는 리뷰 없음", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reviews"
)]
pub async fn delete_review(
    _auth: AdminAuth,
    State(state): State<Arc<AppState>>,
    ApiPath((company_id, review_id)): ApiPath<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    let (company_id, review_id) = ids(company_id, review_id)?;
    state.reviews.delete(company_id, review_id).await?;
    Ok(ApiResponse::message("Review deleted successfully"))
}

// ================================================================================================
// Router
// ================================================================================================

pub fn reviews_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/company/{company_id}/addreview", post(add_review))
        .route("/company/{company_id}/review", get(list_reviews))
        .route(
            "/company/{company_id}/review/{review_id}",
            get(get_review)
                .put(update_review)
                .patch(patch_review)
                .delete(delete_review),
        )
}
