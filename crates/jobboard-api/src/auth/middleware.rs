//! 인증 게이트와 역할 가드.
//!
//! - [`authenticate`]: 요청마다 Bearer 토큰을 확인해 [`Principal`]을 요청 컨텍스트에 첨부합니다.
//!   토큰이 없거나 유효하지 않아도 요청은 계속 진행됩니다.
//! - [`CurrentUser`], [`RequireRole`]: 핸들러 인자로 선언하는 가드.
//!   주체가 없으면 401, 역할이 없으면 403으로 거부합니다.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use jobboard_core::JobBoardResult;

use super::roles::{AdminRole, ManagerRole, Principal, RoleRequirement, UserRole};
use crate::error::ApiError;
use crate::state::AppState;

/// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 인증 게이트 미들웨어.
///
/// 이미 주체가 첨부된 요청은 건드리지 않습니다.
/// 사용자 조회 중 저장소 에러가 나면 구조화된 500 응답을 돌려줍니다.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<Principal>().is_none() {
        if let Some(token) = bearer_token(request.headers()) {
            match resolve_principal(&state, token).await {
                Ok(Some(principal)) => {
                    debug!(username = %principal.username, "인증 주체 첨부");
                    request.extensions_mut().insert(principal);
                }
                Ok(None) => {}
                Err(e) => return ApiError::from(e).into_response(),
            }
        }
    }

    next.run(request).await
}

/// 토큰을 검증한 뒤 사용자의 권한을 로드합니다.
async fn resolve_principal(state: &AppState, token: &str) -> JobBoardResult<Option<Principal>> {
    let username = match state.tokens.subject(token) {
        Ok(username) => username,
        Err(e) => {
            debug!(error = %e, "유효하지 않은 토큰, 인증 없이 진행");
            return Ok(None);
        }
    };

    let Some(account) = state.users.find_by_username(&username).await? else {
        debug!(username = %username, "토큰의 사용자가 존재하지 않음");
        return Ok(None);
    };

    Ok(Some(Principal::new(account.user.username, account.roles)))
}

/// 인증된 주체를 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::authentication_required)
    }
}

/// 특정 역할을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct RequireRole<R: RoleRequirement>(pub Principal, PhantomData<R>);

impl<R: RoleRequirement> RequireRole<R> {
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// 주체가 역할을 보유했는지 확인합니다.
pub fn require_role<R: RoleRequirement>(principal: &Principal) -> Result<(), ApiError> {
    if principal.has_authority(R::ROLE) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(R::ROLE.authority()))
    }
}

impl<S, R> FromRequestParts<S> for RequireRole<R>
where
    S: Send + Sync,
    R: RoleRequirement,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(principal) = CurrentUser::from_request_parts(parts, state).await?;
        require_role::<R>(&principal)?;
        Ok(RequireRole(principal, PhantomData))
    }
}

/// ADMIN 권한 가드.
pub type AdminAuth = RequireRole<AdminRole>;
/// MANAGER 권한 가드.
pub type ManagerAuth = RequireRole<ManagerRole>;
/// USER 권한 가드.
pub type UserAuth = RequireRole<UserRole>;
