//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: Bearer 토큰 발급/검증 (HS512)
//! - [`authenticate`]: 요청마다 주체를 첨부하는 게이트
//! - [`AdminAuth`], [`ManagerAuth`], [`UserAuth`]: 라우트별 역할 가드
//! - 비밀번호 해싱 (Argon2)
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn delete_company(_auth: AdminAuth, ApiPath(id): ApiPath<i64>) -> ApiResult<...> {
//!     // ADMIN 권한이 있는 요청만 도달
//! }
//! ```

mod jwt;
mod middleware;
mod password;
mod roles;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{
    authenticate, bearer_token, require_role, AdminAuth, CurrentUser, ManagerAuth, RequireRole,
    UserAuth,
};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::{AdminRole, ManagerRole, Principal, RoleRequirement, UserRole};
