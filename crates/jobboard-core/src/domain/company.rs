//! 회사 레코드 및 입력 DTO.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::patch::{
    boolean, optional_i32, optional_string, required_string, PatchError, Patchable,
};
use crate::validation::{collect_messages, not_blank, EMAIL_RE, PHONE_RE, WEBSITE_RE};

/// 저장된 회사.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,

    #[validate(length(max = 100, message = "Industry must be at most 100 characters"))]
    pub industry: Option<String>,
    pub founded_year: Option<i32>,
    pub employee_count: Option<i32>,
    pub is_active: bool,
}

/// 회사 생성/전체 수정 요청.
///
/// `id`는 요청 본문에 있어도 무시됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInput {
    #[validate(
        custom(function = "not_blank", message = "Company name is required"),
        length(max = 255, message = "Company name must be at most 255 characters")
    )]
    pub name: String,

    pub description: Option<String>,

    #[validate(
        regex(path = *WEBSITE_RE, message = "Invalid website URL format"),
        length(max = 255, message = "Website URL must be at most 255 characters")
    )]
    pub website_url: Option<String>,

    #[validate(
        regex(path = *EMAIL_RE, message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(regex(
        path = *PHONE_RE,
        message = "Phone number must be 10 to 15 digits and may start with +"
    ))]
    pub phone_number: Option<String>,

    pub address: Option<String>,
    pub industry: Option<String>,
    pub founded_year: Option<i32>,

    #[validate(range(min = 1, message = "Employee count must be at least 1"))]
    pub employee_count: Option<i32>,

    pub is_active: bool,
}

impl Default for CompanyInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            website_url: None,
            email: String::new(),
            phone_number: None,
            address: None,
            industry: None,
            founded_year: None,
            employee_count: None,
            is_active: true,
        }
    }
}

impl Company {
    /// 입력 DTO로부터 레코드를 만듭니다.
    pub fn from_input(id: i64, input: CompanyInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            website_url: input.website_url,
            email: input.email,
            phone_number: input.phone_number,
            address: input.address,
            industry: input.industry,
            founded_year: input.founded_year,
            employee_count: input.employee_count,
            is_active: input.is_active,
        }
    }
}

impl From<&Company> for CompanyInput {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            description: company.description.clone(),
            website_url: company.website_url.clone(),
            email: company.email.clone(),
            phone_number: company.phone_number.clone(),
            address: company.address.clone(),
            industry: company.industry.clone(),
            founded_year: company.founded_year,
            employee_count: company.employee_count,
            is_active: company.is_active,
        }
    }
}

impl Patchable for Company {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "description",
        "websiteUrl",
        "email",
        "phoneNumber",
        "address",
        "industry",
        "foundedYear",
        "employeeCount",
        "isActive",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), PatchError> {
        match field {
            "name" => self.name = required_string(field, value)?,
            "description" => self.description = optional_string(field, value)?,
            "websiteUrl" => self.website_url = optional_string(field, value)?,
            "email" => self.email = required_string(field, value)?,
            "phoneNumber" => self.phone_number = optional_string(field, value)?,
            "address" => self.address = optional_string(field, value)?,
            "industry" => self.industry = optional_string(field, value)?,
            "foundedYear" => self.founded_year = optional_i32(field, value)?,
            "employeeCount" => self.employee_count = optional_i32(field, value)?,
            "isActive" => self.is_active = boolean(field, value)?,
            other => return Err(PatchError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate_patched(&self) -> Result<(), PatchError> {
        CompanyInput::from(self)
            .validate()
            .map_err(|e| PatchError::Invalid(collect_messages(&e)))
    }
}
