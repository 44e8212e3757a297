//! 프로세스 내 저장소.
//!
//! 데이터베이스 URL 없이 서버를 띄우거나 라우터 테스트를 돌릴 때 사용합니다.
//! 모든 쓰기는 단일 쓰기 잠금 아래에서 수행되므로 병합/연쇄 삭제가 원자적입니다.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use jobboard_core::{
    apply_patch, Company, CompanyInput, Job, JobBoardError, JobBoardResult, JobFilter, JobInput,
    NewUser, PageRequest, PatchDocument, Review, ReviewInput, RoleType, User, UserWithRoles,
};

use super::{CompanyRepository, JobRepository, ReviewRepository, StoreHealth, UserRepository};

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<i64, Company>,
    jobs: BTreeMap<i64, Job>,
    reviews: BTreeMap<i64, Review>,
    users: BTreeMap<String, UserWithRoles>,
    roles: BTreeSet<RoleType>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn ensure_company(&self, company_id: Option<i64>) -> JobBoardResult<()> {
        match company_id {
            Some(id) if !self.companies.contains_key(&id) => {
                Err(JobBoardError::not_found("Company", id))
            }
            _ => Ok(()),
        }
    }

    fn ensure_unique_company_name(&self, name: &str, except: Option<i64>) -> JobBoardResult<()> {
        let taken = self
            .companies
            .values()
            .any(|c| c.name == name && Some(c.id) != except);
        if taken {
            return Err(company_name_taken());
        }
        Ok(())
    }

    fn scoped_review(&self, company_id: i64, review_id: i64) -> Option<&Review> {
        self.reviews
            .get(&review_id)
            .filter(|review| review.company_id == company_id)
    }
}

pub(crate) fn company_name_taken() -> JobBoardError {
    JobBoardError::invalid("Company name already exists")
}

pub(crate) fn username_taken(username: &str) -> JobBoardError {
    JobBoardError::invalid(format!("User already exists with username: {}", username))
}

/// 인메모리 저장소.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for MemoryRepository {
    async fn create(&self, input: CompanyInput) -> JobBoardResult<Company> {
        let mut tables = self.tables.write().await;
        tables.ensure_unique_company_name(&input.name, None)?;

        let id = tables.next_id();
        let company = Company::from_input(id, input);
        tables.companies.insert(id, company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn list(&self) -> JobBoardResult<Vec<Company>> {
        Ok(self.tables.read().await.companies.values().cloned().collect())
    }

    async fn exists(&self, id: i64) -> JobBoardResult<bool> {
        Ok(self.tables.read().await.companies.contains_key(&id))
    }

    async fn update(&self, id: i64, input: CompanyInput) -> JobBoardResult<Option<Company>> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_unique_company_name(&input.name, Some(id))?;

        let company = Company::from_input(id, input);
        tables.companies.insert(id, company.clone());
        Ok(Some(company))
    }

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Company>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.companies.get(&id) else {
            return Ok(None);
        };

        let next = apply_patch(current, patch)?;
        tables.ensure_unique_company_name(&next.name, Some(id))?;
        tables.companies.insert(id, next.clone());
        Ok(Some(next))
    }

    async fn delete(&self, id: i64) -> JobBoardResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.companies.remove(&id).is_none() {
            return Ok(false);
        }
        tables.jobs.retain(|_, job| job.company_id != Some(id));
        tables.reviews.retain(|_, review| review.company_id != id);
        Ok(true)
    }
}

#[async_trait]
impl JobRepository for MemoryRepository {
    async fn create(&self, input: JobInput) -> JobBoardResult<Job> {
        let mut tables = self.tables.write().await;
        tables.ensure_company(input.company_id)?;

        let id = tables.next_id();
        let job = Job::from_input(id, input);
        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: i64) -> JobBoardResult<Option<Job>> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list(&self) -> JobBoardResult<Vec<Job>> {
        Ok(self.tables.read().await.jobs.values().cloned().collect())
    }

    async fn page(&self, request: PageRequest) -> JobBoardResult<(Vec<Job>, i64)> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(0);

        let content = tables.jobs.values().skip(offset).take(limit).cloned().collect();
        let total = i64::try_from(tables.jobs.len()).unwrap_or(i64::MAX);
        Ok((content, total))
    }

    async fn filter(&self, filter: &JobFilter) -> JobBoardResult<Vec<Job>> {
        let tables = self.tables.read().await;
        Ok(tables
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, input: JobInput) -> JobBoardResult<Option<Job>> {
        let mut tables = self.tables.write().await;
        if !tables.jobs.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_company(input.company_id)?;

        let job = Job::from_input(id, input);
        tables.jobs.insert(id, job.clone());
        Ok(Some(job))
    }

    async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Option<Job>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.jobs.get(&id) else {
            return Ok(None);
        };

        let next = apply_patch(current, patch)?;
        tables.ensure_company(next.company_id)?;
        tables.jobs.insert(id, next.clone());
        Ok(Some(next))
    }

    async fn delete(&self, id: i64) -> JobBoardResult<bool> {
        Ok(self.tables.write().await.jobs.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for MemoryRepository {
    async fn create(&self, company_id: i64, input: ReviewInput) -> JobBoardResult<Review> {
        let mut tables = self.tables.write().await;
        tables.ensure_company(Some(company_id))?;

        let id = tables.next_id();
        let review = Review::from_input(id, company_id, input);
        tables.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn list_by_company(&self, company_id: i64) -> JobBoardResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .filter(|review| review.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn find(&self, company_id: i64, review_id: i64) -> JobBoardResult<Option<Review>> {
        Ok(self
            .tables
            .read()
            .await
            .scoped_review(company_id, review_id)
            .cloned())
    }

    async fn update(
        &self,
        company_id: i64,
        review_id: i64,
        input: ReviewInput,
    ) -> JobBoardResult<Option<Review>> {
        let mut tables = self.tables.write().await;
        if tables.scoped_review(company_id, review_id).is_none() {
            return Ok(None);
        }

        let review = Review::from_input(review_id, company_id, input);
        tables.reviews.insert(review_id, review.clone());
        Ok(Some(review))
    }

    async fn patch(
        &self,
        company_id: i64,
        review_id: i64,
        patch: &PatchDocument,
    ) -> JobBoardResult<Option<Review>> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.scoped_review(company_id, review_id) else {
            return Ok(None);
        };

        let next = apply_patch(current, patch)?;
        tables.reviews.insert(review_id, next.clone());
        Ok(Some(next))
    }

    async fn delete(&self, company_id: i64, review_id: i64) -> JobBoardResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.scoped_review(company_id, review_id).is_none() {
            return Ok(false);
        }
        tables.reviews.remove(&review_id);
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn seed_roles(&self) -> JobBoardResult<()> {
        self.tables.write().await.roles.extend(RoleType::ALL);
        Ok(())
    }

    async fn create(&self, user: NewUser) -> JobBoardResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.username) {
            return Err(username_taken(&user.username));
        }
        if let Some(missing) = user.roles.iter().find(|r| !tables.roles.contains(*r)) {
            return Err(JobBoardError::Internal(format!(
                "role {} has not been seeded",
                missing
            )));
        }

        let id = tables.next_id();
        let record = User {
            id,
            username: user.username.clone(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: Utc::now(),
        };
        tables.users.insert(
            user.username,
            UserWithRoles {
                user: record.clone(),
                roles: user.roles,
            },
        );
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> JobBoardResult<Option<UserWithRoles>> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }
}

#[async_trait]
impl StoreHealth for MemoryRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn company_input(name: &str) -> CompanyInput {
        CompanyInput {
            name: name.into(),
            email: "hr@acme.io".into(),
            ..CompanyInput::default()
        }
    }

    fn job_input(title: &str, company_id: Option<i64>) -> JobInput {
        JobInput {
            title: title.into(),
            company_id,
            ..JobInput::default()
        }
    }

    #[tokio::test]
    async fn test_company_delete_cascades() {
        let repo = MemoryRepository::new();
        let acme = CompanyRepository::create(&repo, company_input("Acme")).await.unwrap();
        let other = CompanyRepository::create(&repo, company_input("Other")).await.unwrap();

        let job = JobRepository::create(&repo, job_input("Engineer", Some(acme.id))).await.unwrap();
        let kept = JobRepository::create(&repo, job_input("Analyst", Some(other.id))).await.unwrap();
        let review = ReviewRepository::create(
            &repo,
            acme.id,
            ReviewInput { reviewer_name: "Asha".into(), rating: 4, comment: None },
        )
        .await
        .unwrap();

        assert!(CompanyRepository::delete(&repo, acme.id).await.unwrap());

        assert!(JobRepository::find_by_id(&repo, job.id).await.unwrap().is_none());
        assert!(ReviewRepository::find(&repo, acme.id, review.id).await.unwrap().is_none());
        assert!(JobRepository::find_by_id(&repo, kept.id).await.unwrap().is_some());
        assert!(!CompanyRepository::delete(&repo, acme.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_job_requires_existing_company() {
        let repo = MemoryRepository::new();
        let err = JobRepository::create(&repo, job_input("Engineer", Some(99))).await.unwrap_err();
        assert_eq!(err, JobBoardError::not_found("Company", 99));
    }

    #[tokio::test]
    async fn test_review_scoping() {
        let repo = MemoryRepository::new();
        let a = CompanyRepository::create(&repo, company_input("A")).await.unwrap();
        let b = CompanyRepository::create(&repo, company_input("B")).await.unwrap();
        let review = ReviewRepository::create(
            &repo,
            a.id,
            ReviewInput { reviewer_name: "Asha".into(), rating: 5, comment: None },
        )
        .await
        .unwrap();

        assert!(ReviewRepository::find(&repo, b.id, review.id).await.unwrap().is_none());
        assert!(!ReviewRepository::delete(&repo, b.id, review.id).await.unwrap());
        assert!(ReviewRepository::find(&repo, a.id, review.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_patch_leaves_record() {
        let repo = MemoryRepository::new();
        let job = JobRepository::create(&repo, job_input("Engineer", None)).await.unwrap();

        let patch = serde_json::from_value(json!({"title": "Lead", "bogus": true})).unwrap();
        assert!(JobRepository::patch(&repo, job.id, &patch).await.is_err());

        let stored = JobRepository::find_by_id(&repo, job.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Engineer");
    }

    #[tokio::test]
    async fn test_duplicate_company_name() {
        let repo = MemoryRepository::new();
        CompanyRepository::create(&repo, company_input("Acme")).await.unwrap();
        let err = CompanyRepository::create(&repo, company_input("Acme")).await.unwrap_err();
        assert!(matches!(err, JobBoardError::Validation(_)));
    }

    #[tokio::test]
    async fn test_user_roles_require_seeding() {
        let repo = MemoryRepository::new();
        let user = NewUser {
            username: "a@b.io".into(),
            email: "a@b.io".into(),
            password_hash: "x".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            roles: vec![RoleType::User],
        };
        assert!(UserRepository::create(&repo, user.clone()).await.is_err());

        repo.seed_roles().await.unwrap();
        UserRepository::create(&repo, user.clone()).await.unwrap();
        assert!(UserRepository::create(&repo, user).await.is_err());

        let found = repo.find_by_username("a@b.io").await.unwrap().unwrap();
        assert_eq!(found.roles, vec![RoleType::User]);
    }
}
