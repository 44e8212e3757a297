use async_trait::async_trait;
use tracing::debug;

use jobboard_core::{apply_patch, Company, CompanyInput, JobBoardResult, PatchDocument};

use super::{map_unique, PgRepository};
use crate::repository::memory::company_name_taken;
use crate::repository::CompanyRepository;

#[async_trait]
impl CompanyRepository for PgRepository {
    async fn create(&self, input: CompanyInput) -> JobBoardResult<Company> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                name, description, website_url, email, phone_number,
                address, industry, founded_year, employee_count, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, description, website_url, email, phone_number,
                      address, industry, founded_year, employee_count, is_active
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.website_url)
        .bind(&input.email)
        .bind(&input.phone_number)
        .bind(&input.address)
        .bind(&input.industry)
        .bind(input.founded_year)
        .bind(input.employee_count)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, company_name_taken))
    }

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, description, website_url, email, phone_number,
                   address, industry, founded_year, employee_count, is_active
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn list(&self) -> JobBoardResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, description, website_url, email, phone_number,
                   address, industry, founded_year, employee_count, is_active
            FROM companies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    async fn exists(&self, id: i64) -> JobBoardResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn update(&self, id: i64, input: CompanyInput) -> JobBoardResult<Option<Company>> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, description = $3, website_url = $4, email = $5,
                phone_number = $6, address = $7, industry = $8, founded_year = $9,
                employee_count = $10, is_active = $11
            WHERE id = $1
            RETURNING id, name, description, website_url, email, phone_number,
                      address, industry, founded_year, employee_count, is_active
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.website_url)
        .bind(&input.email)
        .bind(&input.phone_number)
        .bind(&input.address)
        .bind(&input.industry)
        .bind(input.founded_year)
        .bind(input.employee_count)
        .bind(input.is_active)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_unique(e, company_name_taken))?;

        tx.commit().await?;
        Ok(company)
    }

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Company>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, description, website_url, email, phone_number,
                   address, industry, founded_year, employee_count, is_active
            FROM companies
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let next = apply_patch(&current, patch)?;

        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, description = $3, website_url = $4, email = $5,
                phone_number = $6, address = $7, industry = $8, founded_year = $9,
                employee_count = $10, is_active = $11
            WHERE id = $1
            RETURNING id, name, description, website_url, email, phone_number,
                      address, industry, founded_year, employee_count, is_active
            "#,
        )
        .bind(id)
        .bind(&next.name)
        .bind(&next.description)
        .bind(&next.website_url)
        .bind(&next.email)
        .bind(&next.phone_number)
        .bind(&next.address)
        .bind(&next.industry)
        .bind(next.founded_year)
        .bind(next.employee_count)
        .bind(next.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique(e, company_name_taken))?;

        tx.commit().await?;
        Ok(Some(company))
    }

    async fn delete(&self, id: i64) -> JobBoardResult<bool> {
        let mut tx = self.pool.begin().await?;

        let reviews = sqlx::query("DELETE FROM reviews WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let jobs = sqlx::query("DELETE FROM jobs WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !deleted {
            // 트랜잭션을 커밋하지 않고 롤백
            return Ok(false);
        }

        tx.commit().await?;
        debug!(company_id = id, jobs, reviews, "회사 연쇄 삭제");
        Ok(true)
    }
}
