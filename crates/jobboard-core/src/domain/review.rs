//! 회사 리뷰.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::patch::{optional_string, required_i32, required_string, PatchError, Patchable};
use crate::validation::{collect_messages, not_blank};

/// 저장된 리뷰. 항상 회사 하나에 속합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub company_id: i64,
}

/// 리뷰 생성/수정 요청. 회사는 경로에서 결정됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewInput {
    #[validate(
        custom(function = "not_blank", message = "Reviewer name is required"),
        length(max = 255, message = "Reviewer name must be at most 255 characters")
    )]
    pub reviewer_name: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    pub comment: Option<String>,
}

impl Review {
    pub fn from_input(id: i64, company_id: i64, input: ReviewInput) -> Self {
        Self {
            id,
            reviewer_name: input.reviewer_name,
            rating: input.rating,
            comment: input.comment,
            company_id,
        }
    }
}

impl From<&Review> for ReviewInput {
    fn from(review: &Review) -> Self {
        Self {
            reviewer_name: review.reviewer_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
        }
    }
}

impl Patchable for Review {
    const FIELDS: &'static [&'static str] = &["reviewerName", "rating", "comment"];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), PatchError> {
        match field {
            "reviewerName" => self.reviewer_name = required_string(field, value)?,
            "rating" => self.rating = required_i32(field, value)?,
            "comment" => self.comment = optional_string(field, value)?,
            other => return Err(PatchError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate_patched(&self) -> Result<(), PatchError> {
        ReviewInput::from(self)
            .validate()
            .map_err(|e| PatchError::Invalid(collect_messages(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::apply_patch;
    use serde_json::json;

    #[test]
    fn test_rating_bounds() {
        let mut input = ReviewInput {
            reviewer_name: "Asha".into(),
            rating: 5,
            comment: None,
        };
        assert!(input.validate().is_ok());

        input.rating = 6;
        assert!(input.validate().is_err());

        input.rating = 0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_missing_rating_is_invalid() {
        let input: ReviewInput = serde_json::from_value(json!({"reviewerName": "Asha"})).unwrap();
        let messages = collect_messages(&input.validate().unwrap_err());
        assert_eq!(messages, vec!["Rating must be between 1 and 5".to_string()]);
    }

    #[test]
    fn test_patch_cannot_move_review_between_companies() {
        let review = Review::from_input(
            1,
            9,
            ReviewInput {
                reviewer_name: "Asha".into(),
                rating: 4,
                comment: None,
            },
        );
        let patch = serde_json::from_value(json!({"companyId": 2})).unwrap();
        assert_eq!(
            apply_patch(&review, &patch),
            Err(PatchError::UnknownField("companyId".into()))
        );
    }
}
