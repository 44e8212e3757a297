use async_trait::async_trait;

use jobboard_core::{apply_patch, JobBoardResult, PatchDocument, Review, ReviewInput};

use super::{ensure_company, PgRepository};
use crate::repository::ReviewRepository;

#[async_trait]
impl ReviewRepository for PgRepository {
    async fn create(&self, company_id: i64, input: ReviewInput) -> JobBoardResult<Review> {
        let mut tx = self.pool.begin().await?;
        ensure_company(&mut *tx, Some(company_id)).await?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (reviewer_name, rating, comment, company_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, reviewer_name, rating, comment, company_id
            "#,
        )
        .bind(&input.reviewer_name)
        .bind(input.rating)
        .bind(&input.comment)
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(review)
    }

    async fn list_by_company(&self, company_id: i64) -> JobBoardResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_name, rating, comment, company_id
            FROM reviews
            WHERE company_id = $1
            ORDER BY id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn find(&self, company_id: i64, review_id: i64) -> JobBoardResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_name, rating, comment, company_id
            FROM reviews
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(review_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn update(
        &self,
        company_id: i64,
        review_id: i64,
        input: ReviewInput,
    ) -> JobBoardResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET reviewer_name = $3, rating = $4, comment = $5
            WHERE id = $1 AND company_id = $2
            RETURNING id, reviewer_name, rating, comment, company_id
            "#,
        )
        .bind(review_id)
        .bind(company_id)
        .bind(&input.reviewer_name)
        .bind(input.rating)
        .bind(&input.comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn patch(
        &self,
        company_id: i64,
        review_id: i64,
        patch: &PatchDocument,
    ) -> JobBoardResult<Option<Review>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_name, rating, comment, company_id
            FROM reviews
            WHERE id = $1 AND company_id = $2
            FOR UPDATE
            "#,
        )
        .bind(review_id)
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let next = apply_patch(&current, patch)?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET reviewer_name = $2, rating = $3, comment = $4
            WHERE id = $1
            RETURNING id, reviewer_name, rating, comment, company_id
            "#,
        )
        .bind(review_id)
        .bind(&next.reviewer_name)
        .bind(next.rating)
        .bind(&next.comment)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(review))
    }

    async fn delete(&self, company_id: i64, review_id: i64) -> JobBoardResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND company_id = $2")
            .bind(review_id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
