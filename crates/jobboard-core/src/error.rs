//! 잡보드 도메인의 에러 타입.
//!
//! 서비스/저장소 계층은 모두 [`JobBoardError`]를 반환하고,
//! API 계층이 이를 HTTP 에러 응답으로 변환합니다.

use thiserror::Error;
use validator::ValidationErrors;

use crate::patch::PatchError;
use crate::validation::collect_messages;

/// 핵심 도메인 에러.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobBoardError {
    /// 리소스를 찾을 수 없음
    #[error("{0}")]
    NotFound(String),

    /// 입력 검증 실패 (필드별 메시지 목록)
    #[error("Validation failed for the following fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// 요청 본문/파라미터 해석 실패
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// 인증 실패
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 부족
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 데이터베이스 에러
    #[error("database error: {0}")]
    Database(String),

    /// 설정 에러
    #[error("configuration error: {0}")]
    Config(String),

    /// 내부 에러
    #[error("internal error: {0}")]
    Internal(String),
}

/// 잡보드 작업을 위한 Result 타입.
pub type JobBoardResult<T> = Result<T, JobBoardError>;

impl JobBoardError {
    /// `"<Entity> not found with ID: <id>"` 형식의 NotFound 에러.
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{} not found with ID: {}", entity, id))
    }

    /// 단일 메시지 검증 에러.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// 클라이언트 에러(4xx)인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            JobBoardError::Database(_) | JobBoardError::Config(_) | JobBoardError::Internal(_)
        )
    }
}

impl From<ValidationErrors> for JobBoardError {
    fn from(errors: ValidationErrors) -> Self {
        JobBoardError::Validation(collect_messages(&errors))
    }
}

impl From<PatchError> for JobBoardError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::Invalid(messages) => JobBoardError::Validation(messages),
            other => JobBoardError::Validation(vec![other.to_string()]),
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for JobBoardError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unique constraint");
                    return JobBoardError::invalid(format!(
                        "duplicate value violates {}",
                        constraint
                    ));
                }
                // foreign_key_violation
                Some("23503") => {
                    return JobBoardError::NotFound(
                        "Referenced resource does not exist".to_string(),
                    );
                }
                _ => {}
            }
        }
        JobBoardError::Database(err.to_string())
    }
}
