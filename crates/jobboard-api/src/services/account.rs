//! 회원 가입 및 로그인.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use jobboard_core::validation::{not_blank, EMAIL_RE};
use jobboard_core::{JobBoardError, JobBoardResult, NewUser, RoleType, User};

use crate::auth::{hash_password, verify_password, TokenService};
use crate::metrics::{record_login, record_registration};
use crate::repository::UserRepository;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// 회원 가입 요청.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "not_blank", message = "First name is required"),
        length(max = 100, message = "First name must be at most 100 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "not_blank", message = "Last name is required"),
        length(max = 100, message = "Last name must be at most 100 characters")
    )]
    pub last_name: String,

    /// 로그인 아이디로도 사용됩니다.
    #[validate(
        regex(path = *EMAIL_RE, message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    /// 역할 이름 (대소문자 무시). 생략 시 USER.
    #[schema(example = "USER")]
    pub role: Option<String>,
}

/// 로그인 요청.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 가입된 사용자 (비밀번호 해시 제외).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<RoleType>,
    pub created_at: DateTime<Utc>,
}

impl RegisteredUser {
    fn new(user: User, roles: Vec<RoleType>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles,
            created_at: user.created_at,
        }
    }
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// 새 사용자를 등록합니다. 아이디는 이메일입니다.
    pub async fn register(&self, request: RegisterRequest) -> JobBoardResult<RegisteredUser> {
        request.validate()?;
        let role = requested_role(request.role.as_deref())?;

        let password_hash =
            hash_password(&request.password).map_err(|e| JobBoardError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                username: request.email.clone(),
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                roles: vec![role],
            })
            .await?;

        info!(username = %user.username, role = %role, "사용자 등록");
        record_registration(role.name());
        Ok(RegisteredUser::new(user, vec![role]))
    }

    /// 자격 증명을 확인하고 Bearer 토큰을 발급합니다.
    ///
    /// 없는 사용자와 틀린 비밀번호는 같은 401로 응답합니다.
    pub async fn login(&self, request: LoginRequest) -> JobBoardResult<String> {
        let account = self.users.find_by_username(&request.username).await?;

        let Some(account) = account else {
            warn!(username = %request.username, "로그인 실패: 사용자 없음");
            record_login("failure");
            return Err(invalid_credentials());
        };

        if let Err(e) = verify_password(&request.password, &account.user.password_hash) {
            warn!(username = %request.username, error = %e, "로그인 실패");
            record_login("failure");
            return Err(invalid_credentials());
        }

        let token = self
            .tokens
            .issue(&account.user.username)
            .map_err(|e| JobBoardError::Internal(e.to_string()))?;

        info!(username = %account.user.username, "로그인 성공");
        record_login("success");
        Ok(token)
    }
}

fn invalid_credentials() -> JobBoardError {
    JobBoardError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
}

fn requested_role(role: Option<&str>) -> JobBoardResult<RoleType> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(RoleType::default()),
        Some(name) => RoleType::parse(name)
            .ok_or_else(|| JobBoardError::Validation(vec![format!("Unknown role: {}", name)])),
    }
}
