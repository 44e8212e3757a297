//! 리소스 서비스.
//!
//! 입력 검증, 저장소 호출, 없는 엔티티의 NotFound 변환, 로깅/메트릭을 담당합니다.
//! 라우트 핸들러는 HTTP 변환만 하고 모든 규칙은 이 계층에 둡니다.

pub mod account;
pub mod company;
pub mod job;
pub mod review;

pub use account::{AccountService, LoginRequest, RegisterRequest, RegisteredUser};
pub use company::CompanyService;
pub use job::JobService;
pub use review::ReviewService;
