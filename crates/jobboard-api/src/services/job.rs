//! 채용공고 서비스.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use jobboard_core::{
    Job, JobBoardError, JobBoardResult, JobFilter, JobInput, Page, PageRequest, PatchDocument,
};

use crate::metrics::{record_resource_created, record_resource_deleted};
use crate::repository::JobRepository;

#[derive(Clone)]
pub struct JobService {
    repo: Arc<dyn JobRepository>,
}

impl JobService {
    pub fn new(repo: Arc<dyn JobRepository>) -> Self {
        Self { repo }
    }

    /// 채용공고 생성. `companyId`가 주어지면 해당 회사가 있어야 합니다.
    pub async fn create(&self, input: JobInput) -> JobBoardResult<Job> {
        input.validate()?;
        let job = self.repo.create(input).await?;

        info!(job_id = job.id, title = %job.title, company_id = ?job.company_id, "채용공고 생성");
        record_resource_created("job");
        Ok(job)
    }

    pub async fn get(&self, id: i64) -> JobBoardResult<Job> {
        debug!(job_id = id, "채용공고 조회");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", id))
    }

    pub async fn list(&self) -> JobBoardResult<Vec<Job>> {
        self.repo.list().await
    }

    pub async fn page(&self, request: PageRequest) -> JobBoardResult<Page<Job>> {
        request.validate()?;
        let (content, total) = self.repo.page(request).await?;
        Ok(Page::new(content, request, total))
    }

    /// 조건 필터. 빈 문자열 조건은 미지정으로 취급합니다.
    pub async fn filter(&self, filter: JobFilter) -> JobBoardResult<Vec<Job>> {
        let filter = filter.normalized();
        debug!(?filter, "채용공고 필터");
        self.repo.filter(&filter).await
    }

    pub async fn update(&self, id: i64, input: JobInput) -> JobBoardResult<Job> {
        input.validate()?;
        let job = self
            .repo
            .update(id, input)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", id))?;

        info!(job_id = id, "채용공고 수정");
        Ok(job)
    }

    pub async fn patch(&self, id: i64, patch: &PatchDocument) -> JobBoardResult<Job> {
        let job = self
            .repo
            .patch(id, patch)
            .await?
            .ok_or_else(|| JobBoardError::not_found("Job", id))?;

        info!(job_id = id, fields = ?patch.keys().collect::<Vec<_>>(), "채용공고 부분 수정");
        Ok(job)
    }

    /// 동기 삭제. 저장소 실패는 그대로 호출자에게 전달됩니다.
    pub async fn delete(&self, id: i64) -> JobBoardResult<()> {
        if !self.repo.delete(id).await? {
            return Err(JobBoardError::not_found("Job", id));
        }

        info!(job_id = id, "채용공고 삭제");
        record_resource_deleted("job");
        Ok(())
    }
}
