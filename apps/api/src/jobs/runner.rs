use std::sync::Arc;

use tracing::{error, info, warn};

use super::scheduler::AnalysisTask;
use super::store::JobStore;
use crate::analysis::Analyzer;
use crate::cv::store::CvStore;
use crate::models::job::TerminalOutcome;

const SOURCE_NOT_FOUND: &str = "Source CV not found or not owned by caller";
const SOURCE_WITHOUT_TEXT: &str = "Source CV has no extracted text";
const SOURCE_UNAVAILABLE: &str = "Source CV could not be loaded";

/// Executes one analysis job to a terminal state.
pub struct JobRunner {
    jobs: Arc<dyn JobStore>,
    cvs: Arc<dyn CvStore>,
    analyzer: Arc<dyn Analyzer>,
}

impl JobRunner {
    pub fn new(jobs: Arc<dyn JobStore>, cvs: Arc<dyn CvStore>, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            jobs,
            cvs,
            analyzer,
        }
    }

    /// Never fails: every problem ends up as a failed job or a log line.
    pub async fn execute(&self, task: AnalysisTask) {
        info!("Analysis job started");
        let outcome = self.run(&task).await;

        match &outcome {
            TerminalOutcome::Completed(_) => info!("Analysis job completed"),
            TerminalOutcome::Failed(reason) => info!(reason = %reason, "Analysis job failed"),
        }

        match self.jobs.finish(task.job_id, task.owner, &outcome).await {
            Ok(true) => {}
            Ok(false) => warn!("Analysis job was deleted before its outcome could be recorded"),
            Err(e) => error!("Failed to record analysis job outcome, job stays pending: {e}"),
        }
    }

    async fn run(&self, task: &AnalysisTask) -> TerminalOutcome {
        let cv = match self.cvs.get(task.cv_id, task.owner).await {
            Ok(Some(cv)) => cv,
            Ok(None) => return TerminalOutcome::Failed(SOURCE_NOT_FOUND.to_string()),
            Err(e) => {
                error!(cv_id = %task.cv_id, "Failed to load source CV: {e}");
                return TerminalOutcome::Failed(SOURCE_UNAVAILABLE.to_string());
            }
        };

        if cv.cv_text_content.trim().is_empty() {
            return TerminalOutcome::Failed(SOURCE_WITHOUT_TEXT.to_string());
        }

        match self
            .analyzer
            .analyze(&cv.cv_text_content, &task.job_description_text)
            .await
        {
            Ok(analysis) => TerminalOutcome::Completed(analysis),
            Err(e) => {
                if e.is_client_error() {
                    warn!("Analysis rejected: {e}");
                } else {
                    error!("Analysis failed: {e}");
                }
                TerminalOutcome::Failed(e.summary().to_string())
            }
        }
    }
}
