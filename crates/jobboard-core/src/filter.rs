//! 채용공고 필터.
//!
//! 설정된 조건만 AND로 결합합니다. 설정되지 않은 필드는 조건을 만들지 않습니다.
//! 빈 문자열 파라미터(`?title=`)는 설정되지 않은 것으로 취급합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Job;

/// 채용공고 검색 조건.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "utoipa-support", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    /// 제목 (정확히 일치)
    pub title: Option<String>,
    /// 고용 형태 (정확히 일치)
    pub employment_type: Option<String>,
    /// 근무지 (부분 일치, 대소문자 구분)
    pub location: Option<String>,
    /// 최소 경력 (포함)
    pub experience_required_gte: Option<i32>,
    /// 최대 경력 (포함)
    pub experience_required_lte: Option<i32>,
    /// 게시일 하한 (포함)
    pub posted_date_after: Option<NaiveDate>,
    /// 마감일 상한 (미포함)
    pub deadline_before: Option<NaiveDate>,
}

impl JobFilter {
    /// 빈 문자열 조건을 제거합니다.
    pub fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }
        self.title = clean(self.title);
        self.employment_type = clean(self.employment_type);
        self.location = clean(self.location);
        self
    }

    /// 조건이 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self == &JobFilter::default()
    }

    /// 레코드가 모든 조건을 만족하는지 확인합니다.
    ///
    /// 비교 대상 컬럼이 비어 있으면 해당 조건은 불일치로 봅니다 (SQL NULL 의미).
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(title) = &self.title {
            if &job.title != title {
                return false;
            }
        }
        if let Some(kind) = &self.employment_type {
            if job.employment_type.as_ref() != Some(kind) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            match &job.location {
                Some(loc) if loc.contains(location.as_str()) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.experience_required_gte {
            if !matches!(job.experience_required, Some(exp) if exp >= min) {
                return false;
            }
        }
        if let Some(max) = self.experience_required_lte {
            if !matches!(job.experience_required, Some(exp) if exp <= max) {
                return false;
            }
        }
        if let Some(after) = self.posted_date_after {
            if !matches!(job.posted_date, Some(d) if d >= after) {
                return false;
            }
        }
        if let Some(before) = self.deadline_before {
            if !matches!(job.deadline, Some(d) if d < before) {
                return false;
            }
        }
        true
    }
}

/// LIKE 패턴의 와일드카드(`%`, `_`)와 이스케이프 문자(`\`)를 이스케이프합니다.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
