//! 저장소 계층.
//!
//! 리소스별 trait을 두고 두 가지 구현을 제공합니다:
//! - [`postgres::PgRepository`]: sqlx + PostgreSQL (운영)
//! - [`memory::MemoryRepository`]: 프로세스 내 저장소 (DB URL 미설정 시, 테스트)
//!
//! 없는 엔티티는 `Ok(None)` / `Ok(false)`로 돌려주고, NotFound 변환은 서비스 계층이 합니다.
//! 읽기-수정-쓰기 경로(전체/부분 업데이트, 연쇄 삭제)는 트랜잭션 하나로 처리됩니다.

use async_trait::async_trait;

use jobboard_core::{
    Company, CompanyInput, Job, JobBoardResult, JobFilter, JobInput, NewUser, PageRequest,
    PatchDocument, Review, ReviewInput, User, UserWithRoles,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// 회사 저장소.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, input: CompanyInput) -> JobBoardResult<Company>;

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Company>>;

    async fn list(&self) -> JobBoardResult<Vec<Company>>;

    async fn exists(&self, id: i64) -> JobBoardResult<bool>;

    async fn update(&self, id: i64, input: CompanyInput) -> JobBoardResult<Option<Company>>;

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Company>>;

    /// 회사와 소속 채용공고/리뷰를 함께 삭제합니다.
    async fn delete(&self, id: i64) -> JobBoardResult<bool>;
}

/// 채용공고 저장소.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// `company_id`가 없는 회사를 가리키면 NotFound.
    async fn create(&self, input: JobInput) -> JobBoardResult<Job>;

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Job>>;

    async fn list(&self) -> JobBoardResult<Vec<Job>>;

    /// 한 페이지와 전체 건수.
    async fn page(&self, request: PageRequest) -> JobBoardResult<(Vec<Job>, i64)>;

    async fn filter(&self, filter: &JobFilter) -> JobBoardResult<Vec<Job>>;

    async fn update(&self, id: i64, input: JobInput) -> JobBoardResult<Option<Job>>;

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Job>>;

    async fn delete(&self, id: i64) -> JobBoardResult<bool>;
}

/// 리뷰 저장소. 모든 조회/수정은 (회사 ID, 리뷰 ID) 쌍으로 한정됩니다.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, company_id: i64, input: ReviewInput) -> JobBoardResult<Review>;

    async fn list_by_company(&self, company_id: i64) -> JobBoardResult<Vec<Review>>;

    async fn find(&self, company_id: i64, review_id: i64) -> JobBoardResult<Option<Review>>;

    async fn update(
        &self,
        company_id: i64,
        review_id: i64,
        input: ReviewInput,
    ) -> JobBoardResult<Option<Review>>;

    async fn patch(
        &self,
        company_id: i64,
        review_id: i64,
        patch: &PatchDocument,
    ) -> JobBoardResult<Option<Review>>;

    async fn delete(&self, company_id: i64, review_id: i64) -> JobBoardResult<bool>;
}

/// 사용자/역할 저장소.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 고정 역할 집합을 없는 것만 추가합니다.
    async fn seed_roles(&self) -> JobBoardResult<()>;

    /// 사용자 이름이 이미 있으면 Validation 에러.
    async fn create(&self, user: NewUser) -> JobBoardResult<User>;

    async fn find_by_username(&self, username: &str) -> JobBoardResult<Option<UserWithRoles>>;
}

/// 저장소 연결 상태 확인.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// 백엔드 이름 ("postgres" | "memory").
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> bool;
}
