//! 에러 응답 정규화 middleware.
//!
//! - 핸들러/추출기가 만든 [`ErrorResponse`]에 요청 경로를 채웁니다.
//! - 프레임워크가 만든 본문 없는 에러 응답(405, 408 등)을 같은 형식으로 바꿉니다.
//! - 패닉은 [`panic_response`]로 500 응답이 됩니다.
//! - [`KeepBody`]가 붙은 응답은 상태 코드와 관계없이 그대로 통과합니다.

use std::any::Any;

use axum::{
    extract::Request,
    http::{header::ALLOW, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::{ApiError, ErrorResponse};

/// 자체 본문을 가진 응답 표시 (예: readiness 503).
#[derive(Debug, Clone, Copy)]
pub struct KeepBody;

/// 모든 에러 응답을 [`ErrorResponse`] 형식으로 맞춥니다.
pub async fn translate_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    let response = next.run(request).await;

    if response.extensions().get::<KeepBody>().is_some() {
        return response;
    }

    if let Some(body) = response.extensions().get::<ErrorResponse>() {
        return body.clone().with_path(path).into_response();
    }

    let status = response.status();
    if status == StatusCode::METHOD_NOT_ALLOWED {
        let allowed = allowed_methods(response.headers());
        return ApiError::UnsupportedMethod { method, allowed }
            .to_body()
            .with_path(path)
            .into_response();
    }

    if status.is_client_error() || status.is_server_error() {
        return ApiError::Status(status).to_body().with_path(path).into_response();
    }

    response
}

fn allowed_methods(headers: &HeaderMap) -> Vec<String> {
    headers
        .get(ALLOW)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// `CatchPanicLayer::custom`용 핸들러.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(cause = %cause, "핸들러 패닉");
    ApiError::Unclassified(cause).into_response()
}
