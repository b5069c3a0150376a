use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{is_foreign_key_violation, StoreError};
use crate::models::job::{AnalysisJob, AnalysisJobRow, JobSummary, JobSummaryRow, TerminalOutcome};

/// Persistence for analysis jobs. Every operation is scoped to `owner`.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Creates a pending job. Fails with [`StoreError::ReferenceRejected`] when
    /// `cv_id` does not exist or belongs to someone else.
    async fn create(
        &self,
        owner: Uuid,
        cv_id: Uuid,
        job_description_text: &str,
    ) -> Result<AnalysisJob, StoreError>;

    /// Writes a terminal outcome. Returns `false` when no job matched.
    async fn finish(
        &self,
        job_id: Uuid,
        owner: Uuid,
        outcome: &TerminalOutcome,
    ) -> Result<bool, StoreError>;

    async fn get(&self, job_id: Uuid, owner: Uuid) -> Result<Option<AnalysisJob>, StoreError>;

    /// Newest first.
    async fn list(&self, owner: Uuid) -> Result<Vec<JobSummary>, StoreError>;

    async fn delete(&self, job_id: Uuid, owner: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(
        &self,
        owner: Uuid,
        cv_id: Uuid,
        job_description_text: &str,
    ) -> Result<AnalysisJob, StoreError> {
        // Inserts nothing unless the CV exists and belongs to the owner.
        let row = sqlx::query_as::<_, AnalysisJobRow>(
            r#"
            INSERT INTO analysis_jobs (id, user_id, cv_id, job_description_text, status)
            SELECT $1, c.user_id, c.id, $4, 'pending'
            FROM user_cvs c
            WHERE c.id = $3 AND c.user_id = $2
            RETURNING id, user_id, cv_id, job_description_text, status, result, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(cv_id)
        .bind(job_description_text)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StoreError::ReferenceRejected
            } else {
                StoreError::Database(e)
            }
        })?
        .ok_or(StoreError::ReferenceRejected)?;

        AnalysisJob::try_from(row).map_err(StoreError::Corrupt)
    }

    async fn finish(
        &self,
        job_id: Uuid,
        owner: Uuid,
        outcome: &TerminalOutcome,
    ) -> Result<bool, StoreError> {
        let result = outcome
            .to_result_value()
            .map_err(|e| StoreError::Corrupt(format!("unserializable outcome: {e}")))?;

        let done = sqlx::query(
            "UPDATE analysis_jobs SET status = $1, result = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(outcome.status().as_str())
        .bind(result)
        .bind(job_id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn get(&self, job_id: Uuid, owner: Uuid) -> Result<Option<AnalysisJob>, StoreError> {
        let row = sqlx::query_as::<_, AnalysisJobRow>(
            r#"
            SELECT id, user_id, cv_id, job_description_text, status, result, created_at
            FROM analysis_jobs
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(job_id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AnalysisJob::try_from)
            .transpose()
            .map_err(StoreError::Corrupt)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<JobSummary>, StoreError> {
        let rows = sqlx::query_as::<_, JobSummaryRow>(
            r#"
            SELECT j.id, c.file_name AS cv_file_name, j.job_description_text, j.status, j.created_at
            FROM analysis_jobs j
            LEFT JOIN user_cvs c ON c.id = j.cv_id
            WHERE j.user_id = $1
            ORDER BY j.created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| JobSummary::try_from(row).map_err(StoreError::Corrupt))
            .collect()
    }

    async fn delete(&self, job_id: Uuid, owner: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM analysis_jobs WHERE id = $1 AND user_id = $2")
            .bind(job_id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
