//! 거부(rejection)를 [`ApiError`]로 바꾸는 추출기 래퍼.
//!
//! axum 기본 추출기는 평문 에러를 돌려주므로, 모든 핸들러는 이 래퍼를 사용합니다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON 본문. 해석 실패는 MalformedRequest.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// 경로 파라미터. 숫자가 아니면 MalformedRequest.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// 쿼리 파라미터.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// 경로 ID는 1 이상이어야 합니다.
pub fn positive_id(name: &str, id: i64) -> Result<i64, ApiError> {
    if id < 1 {
        return Err(ApiError::Validation(vec![format!(
            "{} must be a positive number",
            name
        )]));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_id() {
        assert_eq!(positive_id("Job ID", 1).unwrap(), 1);
        assert!(matches!(
            positive_id("Job ID", 0),
            Err(ApiError::Validation(ref m)) if m[0] == "Job ID must be a positive number"
        ));
    }
}
