//! DTO 검증 공통 규칙.
//!
//! `validator` derive에서 참조하는 정규식과 커스텀 검증 함수를 모아둡니다.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// 이메일 형식.
pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$").expect("valid email regex")
});

/// 웹사이트 URL 형식 (스킴 생략 가능).
pub static WEBSITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\w\-])+\.[\w\-]+(\.[\w\-]+)*(/[\w\-.,@?^=%&:/~+#]*)?$")
        .expect("valid website regex")
});

/// 전화번호 형식 (국가코드 `+` 허용, 10~15자리).
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9]{10,15}$").expect("valid phone regex"));

/// 공백만으로 이루어진 문자열을 거부합니다.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 필드 에러 메시지를 필드명 순서로 평탄화합니다.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, err.code),
            })
        })
        .collect()
}
