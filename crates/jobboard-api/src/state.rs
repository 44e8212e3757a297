//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::repository::{
    CompanyRepository, JobRepository, MemoryRepository, PgRepository, ReviewRepository,
    StoreHealth, UserRepository,
};
use crate::services::{AccountService, CompanyService, JobService, ReviewService};

/// 네 가지 리소스 저장소와 상태 확인을 모두 구현하는 백엔드.
pub trait Store:
    CompanyRepository + JobRepository + ReviewRepository + UserRepository + StoreHealth + 'static
{
}

impl<T> Store for T where
    T: CompanyRepository + JobRepository + ReviewRepository + UserRepository + StoreHealth + 'static
{
}

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// Bearer 토큰 발급/검증
    pub tokens: TokenService,

    /// 인증 게이트의 사용자 조회용
    pub users: Arc<dyn UserRepository>,

    pub accounts: AccountService,
    pub companies: CompanyService,
    pub jobs: JobService,
    pub reviews: ReviewService,

    /// 저장소 연결 상태 (readiness)
    pub health: Arc<dyn StoreHealth>,

    /// 데이터베이스 연결 풀 (메모리 저장소 사용 시 None)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 주어진 저장소로 서비스들을 조립합니다.
    pub fn new<S: Store>(store: Arc<S>, tokens: TokenService) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), tokens.clone()),
            companies: CompanyService::new(store.clone()),
            jobs: JobService::new(store.clone()),
            reviews: ReviewService::new(store.clone(), store.clone()),
            users: store.clone(),
            health: store,
            tokens,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 저장소 상태.
    pub fn postgres(pool: PgPool, tokens: TokenService) -> Self {
        let mut state = Self::new(Arc::new(PgRepository::new(pool.clone())), tokens);
        state.db_pool = Some(pool);
        state
    }

    /// 프로세스 내 저장소 상태. 재시작하면 데이터가 사라집니다.
    pub fn in_memory(tokens: TokenService) -> Self {
        Self::new(Arc::new(MemoryRepository::new()), tokens)
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 메모리 저장소 + 역할 시딩 + 고정 서명 키.
#[cfg(test)]
pub async fn create_test_state() -> AppState {
    let tokens = TokenService::new(&[42u8; 64], chrono::Duration::hours(1), None);
    let state = AppState::in_memory(tokens);
    state
        .users
        .seed_roles()
        .await
        .expect("memory role seeding cannot fail");
    state
}
