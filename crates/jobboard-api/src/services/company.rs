//! 회사 서비스.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use jobboard_core::{Company, CompanyInput, JobBoardError, JobBoardResult, PatchDocument};

use crate::metrics::{record_resource_created, record_resource_deleted};
use crate::repository::CompanyRepository;

#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CompanyInput) -> JobBoardResult<Company> {
        input.validate()?;
        let company = self.repo.create(input).await?;

        info!(company_id = company.id, name = %company.name, "회사 생성");
        record_resource_created("company");
        Ok(company)
    }

    pub async fn get(&self, id: i64) -> JobBoardResult<Company> {
        debug!(company_id = id, "회사 조회");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Company", id))
    }

    pub async fn list(&self) -> JobBoardResult<Vec<Company>> {
        self.repo.list().await
    }

    /// 전체 수정. 요청 본문의 모든 필드로 덮어씁니다.
    pub async fn update(&self, id: i64, input: CompanyInput) -> JobBoardResult<Company> {
        input.validate()?;
        let company = self
            .repo
            .update(id, input)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Company", id))?;

        info!(company_id = id, "회사 수정");
        Ok(company)
    }

    /// 부분 수정. 허용된 키만 반영하고 병합 결과를 다시 검증합니다.
    pub async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Company> {
        let company = self
            .repo
            .patch(id, patch)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Company", id))?;

        info!(company_id = id, fields = ?patch.keys().collect::<Vec<_>>(), "회사 부분 수정");
        Ok(company)
    }

    /// 회사와 소속 채용공고/리뷰를 삭제합니다.
    pub async fn delete(&self, id: i64) -> JobBoardResult<()> {
        if !self.repo.delete(id).await? {
            return Err(JobBoardError::not_found("Company", id));
        }

        info!(company_id = id, "회사 삭제 (연쇄)");
        record_resource_deleted("company");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::repository::MemoryRepository;

    fn service() -> CompanyService {
        CompanyService::new(Arc::new(MemoryRepository::new()))
    }

    fn input(name: &str) -> CompanyInput {
        CompanyInput {
            name: name.to_string(),
            email: format!("hr@{}.io", name.to_lowercase()),
            ..CompanyInput::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_is_validation_error() {
        let service = service();
        service.create(input("Acme")).await.unwrap();

        let err = service.create(input("Acme")).await.unwrap_err();
        assert!(matches!(err, JobBoardError::Validation(_)));
    }

    #[tokio::test]
    async fn test_patch_revalidates_and_keeps_record() {
        let service = service();
        let company = service.create(input("Acme")).await.unwrap();

        let patch = json!({"email": "not-an-email"});
        let err = service
            .patch(company.id, patch.as_object().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, JobBoardError::Validation(ref m) if m.contains(&"Invalid email format".to_string())));

        let stored = service.get(company.id).await.unwrap();
        assert_eq!(stored.email, "hr@acme.io");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_company() {
        let service = service();

        let err = service.update(9, input("Ghost")).await.unwrap_err();
        assert_eq!(err.to_string(), "Company not found with ID: 9");

        let err = service.delete(9).await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound(_)));
    }
}
