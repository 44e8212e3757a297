//! 부분 업데이트(patch) 병합.
//!
//! 엔티티마다 패치 가능한 필드 화이트리스트와 타입이 지정된 setter를 둡니다.
//! 병합은 복사본 위에서 수행되므로 실패 시 원본은 변경되지 않습니다.
//!
//! ```
//! use jobboard_core::{apply_patch, Job, PatchDocument};
//! use serde_json::json;
//!
//! let job = Job { id: 1, title: "Engineer".into(), ..Job::default() };
//! let patch: PatchDocument = serde_json::from_value(json!({"location": "Pune"})).unwrap();
//! let patched = apply_patch(&job, &patch).unwrap();
//! assert_eq!(patched.location.as_deref(), Some("Pune"));
//! assert!(job.location.is_none());
//! ```

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

/// 필드명 → 새 값 맵.
pub type PatchDocument = Map<String, Value>;

/// 병합 에러.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("Patch document must contain at least one field")]
    Empty,

    #[error("Field '{0}' cannot be updated")]
    UnknownField(String),

    #[error("Field '{field}' must be {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    /// 병합 결과가 DTO 검증 규칙을 위반함
    #[error("Patched record is invalid: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// 화이트리스트 기반 부분 업데이트를 지원하는 엔티티.
pub trait Patchable: Clone {
    /// 패치 가능한 필드명 (JSON 표기).
    const FIELDS: &'static [&'static str];

    /// 단일 필드에 값을 적용합니다. `field`는 `FIELDS`에 포함된 이름만 전달됩니다.
    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), PatchError>;

    /// 병합이 끝난 레코드를 검증합니다.
    fn validate_patched(&self) -> Result<(), PatchError> {
        Ok(())
    }
}

/// 패치 문서를 `current`의 복사본에 병합하여 반환합니다.
///
/// 알 수 없는 키가 하나라도 있으면 어떤 필드도 적용하지 않습니다.
pub fn apply_patch<T: Patchable>(current: &T, patch: &PatchDocument) -> Result<T, PatchError> {
    if patch.is_empty() {
        return Err(PatchError::Empty);
    }

    if let Some(unknown) = patch.keys().find(|key| !T::FIELDS.contains(&key.as_str())) {
        return Err(PatchError::UnknownField(unknown.clone()));
    }

    let mut next = current.clone();
    for (field, value) in patch {
        next.set_field(field, value)?;
    }
    next.validate_patched()?;

    Ok(next)
}

// ==================== 값 변환 헬퍼 ====================

fn invalid(field: &str, expected: &'static str) -> PatchError {
    PatchError::InvalidValue {
        field: field.to_string(),
        expected,
    }
}

/// null을 허용하지 않는 문자열.
pub fn required_string(field: &str, value: &Value) -> Result<String, PatchError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(field, "a string"))
}

/// null 허용 문자열.
pub fn optional_string(field: &str, value: &Value) -> Result<Option<String>, PatchError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(invalid(field, "a string or null")),
    }
}

/// null을 허용하지 않는 32비트 정수.
pub fn required_i32(field: &str, value: &Value) -> Result<i32, PatchError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| invalid(field, "an integer"))
}

/// null 허용 32비트 정수.
pub fn optional_i32(field: &str, value: &Value) -> Result<Option<i32>, PatchError> {
    if value.is_null() {
        return Ok(None);
    }
    required_i32(field, value)
        .map(Some)
        .map_err(|_| invalid(field, "an integer or null"))
}

/// null 허용 64비트 ID.
pub fn optional_id(field: &str, value: &Value) -> Result<Option<i64>, PatchError> {
    match value {
        Value::Null => Ok(None),
        v => v
            .as_i64()
            .filter(|id| *id >= 1)
            .map(Some)
            .ok_or_else(|| invalid(field, "a positive integer or null")),
    }
}

/// 불리언.
pub fn boolean(field: &str, value: &Value) -> Result<bool, PatchError> {
    value.as_bool().ok_or_else(|| invalid(field, "a boolean"))
}

/// `YYYY-MM-DD` 날짜 또는 null.
pub fn optional_date(field: &str, value: &Value) -> Result<Option<NaiveDate>, PatchError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid(field, "a date in YYYY-MM-DD format")),
        _ => Err(invalid(field, "a date in YYYY-MM-DD format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Note {
        title: String,
        pages: Option<i32>,
    }

    impl Patchable for Note {
        const FIELDS: &'static [&'static str] = &["title", "pages"];

        fn set_field(&mut self, field: &str, value: &Value) -> Result<(), PatchError> {
            match field {
                "title" => self.title = required_string(field, value)?,
                "pages" => self.pages = optional_i32(field, value)?,
                _ => return Err(PatchError::UnknownField(field.to_string())),
            }
            Ok(())
        }

        fn validate_patched(&self) -> Result<(), PatchError> {
            if self.title.is_empty() {
                return Err(PatchError::Invalid(vec!["title is required".into()]));
            }
            Ok(())
        }
    }

    fn doc(value: Value) -> PatchDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_apply_known_fields() {
        let note = Note { title: "a".into(), pages: None };
        let patched = apply_patch(&note, &doc(json!({"pages": 3}))).unwrap();
        assert_eq!(patched.pages, Some(3));
        assert_eq!(patched.title, "a");
    }

    #[test]
    fn test_unknown_field_rejected_before_any_write() {
        let note = Note { title: "a".into(), pages: None };
        let err = apply_patch(&note, &doc(json!({"pages": 3, "zzz": 1}))).unwrap_err();
        assert_eq!(err, PatchError::UnknownField("zzz".into()));
    }

    #[test]
    fn test_mistyped_value_rejected() {
        let note = Note::default();
        let err = apply_patch(&note, &doc(json!({"pages": "many"}))).unwrap_err();
        assert!(matches!(err, PatchError::InvalidValue { ref field, .. } if field == "pages"));
    }

    #[test]
    fn test_empty_patch_rejected() {
        let err = apply_patch(&Note::default(), &PatchDocument::new()).unwrap_err();
        assert_eq!(err, PatchError::Empty);
    }

    #[test]
    fn test_post_merge_validation() {
        let note = Note { title: "a".into(), pages: None };
        let err = apply_patch(&note, &doc(json!({"title": ""}))).unwrap_err();
        assert!(matches!(err, PatchError::Invalid(_)));
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(optional_string("f", &Value::Null).unwrap(), None);
        assert!(required_string("f", &Value::Null).is_err());
        assert!(required_i32("f", &json!(1.5)).is_err());
        assert!(required_i32("f", &json!(i64::MAX)).is_err());
        assert_eq!(optional_id("f", &json!(7)).unwrap(), Some(7));
        assert!(optional_id("f", &json!(0)).is_err());
        assert!(boolean("f", &json!("true")).is_err());
        assert_eq!(
            optional_date("f", &json!("2025-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert!(optional_date("f", &json!("31/01/2025")).is_err());
    }
}
