//! 성공 응답 envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{statusCode, message, data, timestamp}` 형식의 성공 응답.
///
/// `data`가 없으면 필드 자체를 생략합니다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// 200 OK.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    /// 201 Created.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// 데이터 없는 200 OK.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::created("Job created successfully", 5)).unwrap();
        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["message"], "Job created successfully");
        assert_eq!(value["data"], 5);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_data_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::message("Company deleted successfully")).unwrap();
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_status_propagates_to_http() {
        let response = ApiResponse::created("created", "x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
