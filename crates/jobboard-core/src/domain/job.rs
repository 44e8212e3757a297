//! 채용공고 레코드 및 입력 DTO.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::patch::{
    boolean, optional_date, optional_i32, optional_id, optional_string, required_string,
    PatchError, Patchable,
};
use crate::validation::{collect_messages, not_blank, EMAIL_RE};

/// 저장된 채용공고.
///
/// `company_id`가 있으면 항상 존재하는 회사를 가리킵니다 (FK, 회사 삭제 시 함께 삭제).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub employment_type: Option<String>,
    pub experience_required: Option<i32>,
    pub location: Option<String>,
    pub posted_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub company_id: Option<i64>,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            employment_type: None,
            experience_required: None,
            location: None,
            posted_date: None,
            deadline: None,
            contact_name: None,
            contact_email: None,
            is_active: true,
            company_id: None,
        }
    }
}

/// 채용공고 생성/전체 수정 요청.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    #[validate(
        custom(function = "not_blank", message = "Job title is required"),
        length(max = 255, message = "Job title must be at most 255 characters")
    )]
    pub title: String,

    #[validate(length(max = 50, message = "Employment type must be at most 50 characters"))]
    pub employment_type: Option<String>,

    #[validate(range(min = 0, message = "Experience required cannot be negative"))]
    pub experience_required: Option<i32>,

    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    pub posted_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,

    #[validate(length(max = 255, message = "Contact name must be at most 255 characters"))]
    pub contact_name: Option<String>,

    #[validate(
        regex(path = *EMAIL_RE, message = "Invalid contact email format"),
        length(max = 255, message = "Contact email must be at most 255 characters")
    )]
    pub contact_email: Option<String>,

    pub is_active: bool,

    #[validate(range(min = 1, message = "Company ID must be a positive number"))]
    pub company_id: Option<i64>,
}

impl Default for JobInput {
    fn default() -> Self {
        let job = Job::default();
        JobInput::from(&job)
    }
}

impl Job {
    /// 입력 DTO로부터 레코드를 만듭니다.
    pub fn from_input(id: i64, input: JobInput) -> Self {
        Self {
            id,
            title: input.title,
            employment_type: input.employment_type,
            experience_required: input.experience_required,
            location: input.location,
            posted_date: input.posted_date,
            deadline: input.deadline,
            contact_name: input.contact_name,
            contact_email: input.contact_email,
            is_active: input.is_active,
            company_id: input.company_id,
        }
    }
}

impl From<&Job> for JobInput {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            employment_type: job.employment_type.clone(),
            experience_required: job.experience_required,
            location: job.location.clone(),
            posted_date: job.posted_date,
            deadline: job.deadline,
            contact_name: job.contact_name.clone(),
            contact_email: job.contact_email.clone(),
            is_active: job.is_active,
            company_id: job.company_id,
        }
    }
}

impl Patchable for Job {
    const FIELDS: &'static [&'static str] = &[
        "title",
        "employmentType",
        "experienceRequired",
        "location",
        "postedDate",
        "deadline",
        "contactName",
        "contactEmail",
        "isActive",
        "companyId",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), PatchError> {
        match field {
            "title" => self.title = required_string(field, value)?,
            "employmentType" => self.employment_type = optional_string(field, value)?,
            "experienceRequired" => self.experience_required = optional_i32(field, value)?,
            "location" => self.location = optional_string(field, value)?,
            "postedDate" => self.posted_date = optional_date(field, value)?,
            "deadline" => self.deadline = optional_date(field, value)?,
            "contactName" => self.contact_name = optional_string(field, value)?,
            "contactEmail" => self.contact_email = optional_string(field, value)?,
            "isActive" => self.is_active = boolean(field, value)?,
            "companyId" => self.company_id = optional_id(field, value)?,
            other => return Err(PatchError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate_patched(&self) -> Result<(), PatchError> {
        JobInput::from(self)
            .validate()
            .map_err(|e| PatchError::Invalid(collect_messages(&e)))
    }
}
