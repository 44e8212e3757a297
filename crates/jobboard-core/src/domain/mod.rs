//! 도메인 레코드.

pub mod company;
pub mod job;
pub mod review;
pub mod role;
pub mod user;

pub use company::{Company, CompanyInput};
pub use job::{Job, JobInput};
pub use review::{Review, ReviewInput};
pub use role::{RoleType, AUTHORITY_PREFIX};
pub use user::{NewUser, User, UserWithRoles};
