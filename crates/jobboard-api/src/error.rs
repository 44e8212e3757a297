//! API 에러 응답 및 에러 분류.
//!
//! 모든 실패는 [`ApiError`]로 모이고, 동일한 JSON 형식의 [`ErrorResponse`]로 변환됩니다.
//!
//! ```json
//! {
//!   "statusCode": 404,
//!   "message": "Company not found with ID: 7",
//!   "timestamp": "2025-01-01T09:30:00Z",
//!   "details": "The requested resource does not exist",
//!   "path": "/api/company/getCompany/7"
//! }
//! ```
//!
//! `path`는 [`crate::middleware::translate_errors`]가 응답 직전에 채웁니다.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use jobboard_core::JobBoardError;

pub const MALFORMED_MESSAGE: &str =
    "Malformed JSON or mapping error occurred. Please check your request payload.";
pub const FORBIDDEN_MESSAGE: &str =
    "Access Denied: You do not have the necessary permissions to perform this action.";
pub const UNAUTHORIZED_MESSAGE: &str = "Full authentication is required to access this resource";
pub const UNCLASSIFIED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Requested resource not found";

/// 에러 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP 상태 코드
    pub status_code: u16,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
    /// 서버 시각
    pub timestamp: DateTime<Utc>,
    /// 상세 사유
    pub details: Option<String>,
    /// 요청 경로
    pub path: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            timestamp: Utc::now(),
            details,
            path: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(self.clone())).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// 에러 분류.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// 엔티티 없음 (404)
    #[error("{0}")]
    NotFound(String),

    /// 일치하는 라우트 없음 (404)
    #[error("{}", ROUTE_NOT_FOUND_MESSAGE)]
    RouteNotFound,

    /// 입력 검증 실패 (400)
    #[error("Validation failed for the following fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// 본문/경로/쿼리 해석 실패 (400)
    #[error("{}", MALFORMED_MESSAGE)]
    MalformedRequest(String),

    /// 인증 필요 또는 인증 실패 (401)
    #[error("{0}")]
    Unauthorized(String),

    /// 역할 부족 (403)
    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden(String),

    /// 지원하지 않는 메서드 (400)
    #[error(
        "Request method {method} is not supported on this endpoint. Supported methods: [{}]",
        .allowed.join(", ")
    )]
    UnsupportedMethod { method: String, allowed: Vec<String> },

    /// 분류되지 않은 실패 (500). 내부 사유는 로그에만 남습니다.
    #[error("{}", UNCLASSIFIED_MESSAGE)]
    Unclassified(String),

    /// 프레임워크 레이어가 만든 기타 상태 (예: 408)
    #[error("{}", .0.canonical_reason().unwrap_or("Request failed"))]
    Status(StatusCode),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn authentication_required() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_)
            | ApiError::MalformedRequest(_)
            | ApiError::UnsupportedMethod { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Status(status) => *status,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::NotFound(_) | ApiError::RouteNotFound => {
                Some("The requested resource does not exist".to_string())
            }
            ApiError::Validation(_) => Some(
                "Invalid request data provided. Please check the input parameters.".to_string(),
            ),
            ApiError::MalformedRequest(cause) => Some(cause.clone()),
            ApiError::Forbidden(required) => Some(format!("Required authority: {}", required)),
            ApiError::Unauthorized(_)
            | ApiError::UnsupportedMethod { .. }
            | ApiError::Unclassified(_)
            | ApiError::Status(_) => None,
        }
    }

    /// 응답 본문을 만듭니다 (경로 미포함).
    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse::new(self.status(), self.to_string(), self.details())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unclassified(cause) => error!(cause = %cause, "처리되지 않은 에러"),
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => {
                warn!(status = %self.status(), "인증/인가 거부")
            }
            other => debug!(error = %other, "요청 실패"),
        }
        self.to_body().into_response()
    }
}

impl From<JobBoardError> for ApiError {
    fn from(err: JobBoardError) -> Self {
        match err {
            JobBoardError::NotFound(message) => ApiError::NotFound(message),
            JobBoardError::Validation(messages) => ApiError::Validation(messages),
            JobBoardError::MalformedRequest(cause) => ApiError::MalformedRequest(cause),
            JobBoardError::Unauthorized(message) => ApiError::Unauthorized(message),
            JobBoardError::Forbidden(required) => ApiError::Forbidden(required),
            JobBoardError::Database(cause)
            | JobBoardError::Config(cause)
            | JobBoardError::Internal(cause) => ApiError::Unclassified(cause),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}
