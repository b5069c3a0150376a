use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::StructuredAnalysis;

/// Raw `analysis_jobs` row. Converted to [`AnalysisJob`] before leaving the store.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cv_id: Option<Uuid>,
    pub job_description_text: String,
    pub status: String,
    pub result: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// One row of the job listing, joined with the CV's file name.
#[derive(Debug, Clone, FromRow)]
pub struct JobSummaryRow {
    pub id: Uuid,
    pub cv_file_name: Option<String>,
    pub job_description_text: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

/// Where a job is in its lifecycle. The status is derived from the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Pending,
    Completed(StructuredAnalysis),
    Failed(String),
}

/// The two outcomes a job can be finished with.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalOutcome {
    Completed(StructuredAnalysis),
    Failed(String),
}

impl TerminalOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Completed(_) => JobStatus::Completed,
            Self::Failed(_) => JobStatus::Failed,
        }
    }

    /// Value written to the `result` column.
    pub fn to_result_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Completed(analysis) => serde_json::to_value(analysis),
            Self::Failed(error) => Ok(json!({ "error": error })),
        }
    }
}

impl From<TerminalOutcome> for JobOutcome {
    fn from(outcome: TerminalOutcome) -> Self {
        match outcome {
            TerminalOutcome::Completed(analysis) => Self::Completed(analysis),
            TerminalOutcome::Failed(error) => Self::Failed(error),
        }
    }
}

impl JobOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Pending => JobStatus::Pending,
            Self::Completed(_) => JobStatus::Completed,
            Self::Failed(_) => JobStatus::Failed,
        }
    }

    /// Rebuilds the outcome from the stored columns, rejecting rows where the
    /// result does not agree with the status.
    pub fn from_stored(status: JobStatus, result: Option<Value>) -> Result<Self, String> {
        match (status, result) {
            (JobStatus::Pending, None) => Ok(Self::Pending),
            (JobStatus::Pending, Some(_)) => Err("pending job carries a result".to_string()),
            (JobStatus::Completed, Some(value)) => serde_json::from_value(value)
                .map(Self::Completed)
                .map_err(|e| format!("completed job has an invalid result: {e}")),
            (JobStatus::Failed, Some(value)) => value
                .get("error")
                .and_then(Value::as_str)
                .map(|e| Self::Failed(e.to_string()))
                .ok_or_else(|| "failed job has no error detail".to_string()),
            (status, None) => Err(format!("{status} job has no result")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJob {
    pub id: Uuid,
    pub owner: Uuid,
    pub cv_id: Option<Uuid>,
    pub job_description_text: String,
    pub outcome: JobOutcome,
    pub created_at: DateTime<Utc>,
}

impl AnalysisJob {
    pub fn status(&self) -> JobStatus {
        self.outcome.status()
    }
}

impl TryFrom<AnalysisJobRow> for AnalysisJob {
    type Error = String;

    fn try_from(row: AnalysisJobRow) -> Result<Self, Self::Error> {
        let status: JobStatus = row.status.parse()?;
        let outcome = JobOutcome::from_stored(status, row.result)
            .map_err(|e| format!("job {}: {e}", row.id))?;
        Ok(Self {
            id: row.id,
            owner: row.user_id,
            cv_id: row.cv_id,
            job_description_text: row.job_description_text,
            outcome,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub id: Uuid,
    pub cv_file_name: Option<String>,
    pub job_description_text: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JobSummaryRow> for JobSummary {
    type Error = String;

    fn try_from(row: JobSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse()?,
            id: row.id,
            cv_file_name: row.cv_file_name,
            job_description_text: row.job_description_text,
            created_at: row.created_at,
        })
    }
}

/// Public projection of a job: `result` is only present once completed.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusView {
    pub task_id: Uuid,
    pub status: JobStatus,
    pub result: Option<StructuredAnalysis>,
}

impl From<AnalysisJob> for JobStatusView {
    fn from(job: AnalysisJob) -> Self {
        let status = job.status();
        let result = match job.outcome {
            JobOutcome::Completed(analysis) => Some(analysis),
            JobOutcome::Pending | JobOutcome::Failed(_) => None,
        };
        Self {
            task_id: job.id,
            status,
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListItem {
    pub id: Uuid,
    pub cv_file_name: Option<String>,
    pub job_description_snippet: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}
