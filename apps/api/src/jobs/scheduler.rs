use std::sync::Arc;

use tracing::{info_span, Instrument};
use uuid::Uuid;

use super::runner::JobRunner;

/// Everything the background execution of one job needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTask {
    pub job_id: Uuid,
    pub owner: Uuid,
    pub cv_id: Uuid,
    pub job_description_text: String,
}

/// Hands a task off for out-of-band execution. Must not block on the task.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: AnalysisTask);
}

/// Runs each task as a detached tokio task. Nothing survives a restart.
pub struct TokioScheduler {
    runner: Arc<JobRunner>,
}

impl TokioScheduler {
    pub fn new(runner: Arc<JobRunner>) -> Self {
        Self { runner }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, task: AnalysisTask) {
        let runner = Arc::clone(&self.runner);
        let span = info_span!("analysis_job", job_id = %task.job_id, owner = %task.owner);
        tokio::spawn(async move { runner.execute(task).await }.instrument(span));
    }
}
