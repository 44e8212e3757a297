//! 리뷰 서비스.
//!
//! 리뷰는 항상 (회사 ID, 리뷰 ID) 쌍으로 다룹니다. 회사가 없으면 회사 NotFound,
//! 리뷰가 다른 회사 소속이면 리뷰 NotFound가 됩니다.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use jobboard_core::{JobBoardError, JobBoardResult, PatchDocument, Review, ReviewInput};

use crate::metrics::{record_resource_created, record_resource_deleted};
use crate::repository::{CompanyRepository, ReviewRepository};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self { reviews, companies }
    }

    async fn ensure_company(&self, company_id: i64) -> JobBoardResult<()> {
        if self.companies.exists(company_id).await? {
            Ok(())
        } else {
            Err(JobBoardError::not_found("Company", company_id))
        }
    }

    pub async fn create(&self, company_id: i64, input: ReviewInput) -> JobBoardResult<Review> {
        input.validate()?;
        self.ensure_company(company_id).await?;
        let review = self.reviews.create(company_id, input).await?;

        info!(company_id, review_id = review.id, rating = review.rating, "리뷰 등록");
        record_resource_created("review");
        Ok(review)
    }

    pub async fn list(&self, company_id: i64) -> JobBoardResult<Vec<Review>> {
        self.ensure_company(company_id).await?;
        self.reviews.list_by_company(company_id).await
    }

    pub async fn get(&self, company_id: i64, review_id: i64) -> JobBoardResult<Review> {
        self.ensure_company(company_id).await?;
        self.reviews
            .find(company_id, review_id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Review", review_id))
    }

    pub async fn update(
        &self,
        company_id: i64,
        review_id: i64,
        input: ReviewInput,
    ) -> JobBoardResult<Review> {
        input.validate()?;
        self.ensure_company(company_id).await?;
        let review = self
            .reviews
            .update(company_id, review_id, input)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Review", review_id))?;

        info!(company_id, review_id, "리뷰 수정");
        Ok(review)
    }

    pub async fn patch(
        &self,
        company_id: i64,
        review_id: i64,
        patch: &PatchDocument,
    ) -> JobBoardResult<Review> {
        self.ensure_company(company_id).await?;
        let review = self
            .reviews
            .patch(company_id, review_id, patch)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Review", review_id))?;

        info!(company_id, review_id, "리뷰 부분 수정");
        Ok(review)
    }

    pub async fn delete(&self, company_id: i64, review_id: i64) -> JobBoardResult<()> {
        self.ensure_company(company_id).await?;
        if !self.reviews.delete(company_id, review_id).await? {
            return Err(JobBoardError::not_found("Review", review_id));
        }

        info!(company_id, review_id, "리뷰 삭제");
        record_resource_deleted("review");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use jobboard_core::CompanyInput;

    async fn setup() -> (ReviewService, i64, i64) {
        let repo = Arc::new(MemoryRepository::new());
        let mut ids = Vec::new();
        for name in ["Acme", "Globex"] {
            let company = CompanyRepository::create(
                repo.as_ref(),
                CompanyInput {
                    name: name.into(),
                    email: format!("hr@{}.com", name.to_lowercase()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
            ids.push(company.id);
        }
        (ReviewService::new(repo.clone(), repo), ids[0], ids[1])
    }

    fn review(rating: i32) -> ReviewInput {
        ReviewInput {
            reviewer_name: "Asha".into(),
            rating,
            comment: Some("Good culture".into()),
        }
    }

    #[tokio::test]
    async fn test_review_of_other_company_is_not_found() {
        let (service, acme, globex) = setup().await;
        let created = service.create(acme, review(4)).await.unwrap();

        let err = service.get(globex, created.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Review not found with ID: {}", created.id));

        let err = service.delete(globex, created.id).await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound(_)));
        assert!(service.get(acme, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_company_is_reported_first() {
        let (service, _, _) = setup().await;
        let err = service.list(404).await.unwrap_err();
        assert_eq!(err.to_string(), "Company not found with ID: 404");
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let (service, acme, _) = setup().await;
        let err = service.create(acme, review(6)).await.unwrap_err();
        assert_eq!(
            err,
            JobBoardError::Validation(vec!["Rating must be between 1 and 5".into()])
        );
    }
}
