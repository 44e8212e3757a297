//! 오프셋 기반 페이지네이션.

use serde::{Deserialize, Serialize};

use crate::error::{JobBoardError, JobBoardResult};

/// 최대 페이지 크기.
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_page_size() -> i64 {
    10
}

/// 페이지 요청 (`pageNo`는 0부터 시작).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "utoipa-support", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    pub page_no: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_no: 0,
            page_size: default_page_size(),
        }
    }
}

impl PageRequest {
    pub fn new(page_no: i64, page_size: i64) -> Self {
        Self { page_no, page_size }
    }

    /// 범위를 검증합니다.
    pub fn validate(&self) -> JobBoardResult<()> {
        let mut errors = Vec::new();
        if self.page_no < 0 {
            errors.push("Page number must not be negative".to_string());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            errors.push(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        // 오프셋(page_no * page_size)이 i64 안에 있어야 함
        if self.page_size > 0 && self.page_no.checked_mul(self.page_size).is_none() {
            errors.push("Page number is too large".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(JobBoardError::Validation(errors))
        }
    }

    pub fn offset(&self) -> i64 {
        self.page_no.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// 한 페이지 분량의 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_no: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let size = request.page_size.max(1);
        let total_pages = (total_elements + size - 1) / size;
        Self {
            content,
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last: request.page_no.saturating_add(1) >= total_pages,
        }
    }
}
