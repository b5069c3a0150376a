use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::scheduler::{AnalysisTask, Scheduler};
use super::store::JobStore;
use crate::db::StoreError;
use crate::models::job::{AnalysisJob, JobListItem, JobStatusView, JobSummary};

const SNIPPET_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("CV '{0}' not found or access denied")]
    NotStartable(String),

    #[error("Analysis task {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates analysis jobs, schedules their execution and answers queries about them.
pub struct Orchestrator {
    jobs: Arc<dyn JobStore>,
    scheduler: Arc<dyn Scheduler>,
}

impl Orchestrator {
    pub fn new(jobs: Arc<dyn JobStore>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self { jobs, scheduler }
    }

    /// Persists a pending job and schedules it. Returns without waiting for the analysis.
    pub async fn start(
        &self,
        owner: Uuid,
        cv_reference: &str,
        job_description_text: &str,
    ) -> Result<AnalysisJob, JobError> {
        let cv_id = Uuid::parse_str(cv_reference.trim())
            .map_err(|_| JobError::NotStartable(cv_reference.to_string()))?;

        if job_description_text.trim().is_empty() {
            return Err(JobError::InvalidInput(
                "job_description_text cannot be empty".to_string(),
            ));
        }

        let job = self
            .jobs
            .create(owner, cv_id, job_description_text)
            .await
            .map_err(|e| match e {
                StoreError::ReferenceRejected => JobError::NotStartable(cv_reference.to_string()),
                other => JobError::Store(other),
            })?;

        info!(job_id = %job.id, cv_id = %cv_id, "Analysis job created");

        self.scheduler.schedule(AnalysisTask {
            job_id: job.id,
            owner,
            cv_id,
            job_description_text: job.job_description_text.clone(),
        });

        Ok(job)
    }

    pub async fn status(&self, job_id: Uuid, owner: Uuid) -> Result<JobStatusView, JobError> {
        self.jobs
            .get(job_id, owner)
            .await?
            .map(JobStatusView::from)
            .ok_or(JobError::NotFound(job_id))
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<JobListItem>, JobError> {
        let jobs = self.jobs.list(owner).await?;
        Ok(jobs.into_iter().map(list_item).collect())
    }

    /// Idempotent. A job that is still running keeps running; its outcome is dropped.
    pub async fn delete(&self, job_id: Uuid, owner: Uuid) -> Result<(), JobError> {
        self.jobs.delete(job_id, owner).await?;
        info!(job_id = %job_id, "Analysis job deleted");
        Ok(())
    }
}

fn list_item(job: JobSummary) -> JobListItem {
    JobListItem {
        id: job.id,
        cv_file_name: job.cv_file_name,
        job_description_snippet: snippet(&job.job_description_text, SNIPPET_CHARS),
        status: job.status,
        created_at: job.created_at,
    }
}

/// First `max_chars` characters, with `...` appended when the text was cut.
fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
