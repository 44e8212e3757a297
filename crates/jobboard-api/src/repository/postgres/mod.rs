//! PostgreSQL 저장소.
//!
//! 모든 쿼리는 `sqlx::query_as::<_, T>` + 바인딩으로 작성합니다.
//! 스키마는 저장소 루트의 `migrations/`에 있으며 기동 시 [`PgRepository::migrate`]로 적용됩니다.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use jobboard_core::{JobBoardError, JobBoardResult};

use super::StoreHealth;

mod companies;
mod jobs;
mod reviews;
mod users;

pub use jobs::build_filter_query;

/// sqlx 기반 저장소. 네 가지 리소스 trait을 모두 구현합니다.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 내장 마이그레이션을 적용합니다.
    pub async fn migrate(&self) -> JobBoardResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| JobBoardError::Database(format!("migration failed: {}", e)))?;
        info!("데이터베이스 마이그레이션 완료");
        Ok(())
    }
}

/// unique 제약 위반이면 `on_conflict` 에러로, 아니면 일반 변환.
pub(crate) fn map_unique(err: sqlx::Error, on_conflict: impl FnOnce() -> JobBoardError) -> JobBoardError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => on_conflict(),
        _ => JobBoardError::from(err),
    }
}

/// 트랜잭션 안에서 회사 존재 여부를 확인합니다.
pub(crate) async fn ensure_company<'c, E>(executor: E, company_id: Option<i64>) -> JobBoardResult<()>
where
    E: sqlx::PgExecutor<'c>,
{
    let Some(id) = company_id else {
        return Ok(());
    };

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(JobBoardError::not_found("Company", id))
    }
}

#[async_trait]
impl StoreHealth for PgRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
