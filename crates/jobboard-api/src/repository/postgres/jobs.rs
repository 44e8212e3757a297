use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use jobboard_core::filter::escape_like;
use jobboard_core::{apply_patch, Job, JobBoardResult, JobFilter, JobInput, PageRequest, PatchDocument};

use super::{ensure_company, PgRepository};
use crate::repository::JobRepository;

const JOB_COLUMNS: &str = "id, title, employment_type, experience_required, location, \
     posted_date, deadline, contact_name, contact_email, is_active, company_id";

/// 필터 조건을 AND로 이어 붙인 SELECT 쿼리를 만듭니다.
///
/// 모든 값은 바인딩되며, `location` 부분 일치는 LIKE 와일드카드를 이스케이프합니다.
pub fn build_filter_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM jobs WHERE 1=1", JOB_COLUMNS));

    if let Some(title) = &filter.title {
        builder.push(" AND title = ").push_bind(title.clone());
    }
    if let Some(employment_type) = &filter.employment_type {
        builder
            .push(" AND employment_type = ")
            .push_bind(employment_type.clone());
    }
    if let Some(location) = &filter.location {
        builder
            .push(" AND location LIKE ")
            .push_bind(format!("%{}%", escape_like(location)))
            .push(" ESCAPE '\\'");
    }
    if let Some(min) = filter.experience_required_gte {
        builder.push(" AND experience_required >= ").push_bind(min);
    }
    if let Some(max) = filter.experience_required_lte {
        builder.push(" AND experience_required <= ").push_bind(max);
    }
    if let Some(after) = filter.posted_date_after {
        builder.push(" AND posted_date >= ").push_bind(after);
    }
    if let Some(before) = filter.deadline_before {
        builder.push(" AND deadline < ").push_bind(before);
    }

    builder.push(" ORDER BY id");
    builder
}

#[async_trait]
impl JobRepository for PgRepository {
    async fn create(&self, input: JobInput) -> JobBoardResult<Job> {
        let mut tx = self.pool.begin().await?;
        ensure_company(&mut *tx, input.company_id).await?;

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                title, employment_type, experience_required, location, posted_date,
                deadline, contact_name, contact_email, is_active, company_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.employment_type)
        .bind(input.experience_required)
        .bind(&input.location)
        .bind(input.posted_date)
        .bind(input.deadline)
        .bind(&input.contact_name)
        .bind(&input.contact_email)
        .bind(input.is_active)
        .bind(input.company_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(job)
    }

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn list(&self) -> JobBoardResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY id",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn page(&self, request: PageRequest) -> JobBoardResult<(Vec<Job>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;

        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY id LIMIT $1 OFFSET $2",
            JOB_COLUMNS
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((jobs, total))
    }

    async fn filter(&self, filter: &JobFilter) -> JobBoardResult<Vec<Job>> {
        let mut builder = build_filter_query(filter);
        let jobs = builder
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await?;

        Ok(jobs)
    }

    async fn update(&self, id: i64, input: JobInput) -> JobBoardResult<Option<Job>> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        ensure_company(&mut *tx, input.company_id).await?;
        let job = write_job(&mut tx, id, &input).await?;

        tx.commit().await?;
        Ok(Some(job))
    }

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Job>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1 FOR UPDATE",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let next = apply_patch(&current, patch)?;
        if next.company_id != current.company_id {
            ensure_company(&mut *tx, next.company_id).await?;
        }

        let job = write_job(&mut tx, id, &JobInput::from(&next)).await?;

        tx.commit().await?;
        Ok(Some(job))
    }

    async fn delete(&self, id: i64) -> JobBoardResult<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn write_job(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id: i64,
    input: &JobInput,
) -> JobBoardResult<Job> {
    let job = sqlx::query_as::<_, Job>(&format!(
        r#"
        UPDATE jobs
        SET title = $2, employment_type = $3, experience_required = $4, location = $5,
            posted_date = $6, deadline = $7, contact_name = $8, contact_email = $9,
            is_active = $10, company_id = $11
        WHERE id = $1
        RETURNING {}
        "#,
        JOB_COLUMNS
    ))
    .bind(id)
    .bind(&input.title)
    .bind(&input.employment_type)
    .bind(input.experience_required)
    .bind(&input.location)
    .bind(input.posted_date)
    .bind(input.deadline)
    .bind(&input.contact_name)
    .bind(&input.contact_email)
    .bind(input.is_active)
    .bind(input.company_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(job)
}
