use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::StoreError;
use crate::models::cv::{CvSummary, NewSourceDocument, SourceDocument};

/// Persistence for uploaded CVs. Rows are written once and never updated.
#[async_trait]
pub trait CvStore: Send + Sync {
    async fn insert(&self, doc: NewSourceDocument) -> Result<SourceDocument, StoreError>;

    async fn get(&self, cv_id: Uuid, owner: Uuid) -> Result<Option<SourceDocument>, StoreError>;

    /// Newest first.
    async fn list(&self, owner: Uuid) -> Result<Vec<CvSummary>, StoreError>;

    /// Returns `false` when no CV matched.
    async fn delete(&self, cv_id: Uuid, owner: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgCvStore {
    pool: PgPool,
}

impl PgCvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvStore for PgCvStore {
    async fn insert(&self, doc: NewSourceDocument) -> Result<SourceDocument, StoreError> {
        let row = sqlx::query_as::<_, SourceDocument>(
            r#"
            INSERT INTO user_cvs (id, user_id, file_name, cv_text_content, file_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, file_name, cv_text_content, file_path, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(doc.owner)
        .bind(&doc.file_name)
        .bind(&doc.extracted_text)
        .bind(&doc.storage_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, cv_id: Uuid, owner: Uuid) -> Result<Option<SourceDocument>, StoreError> {
        let row = sqlx::query_as::<_, SourceDocument>(
            r#"
            SELECT id, user_id, file_name, cv_text_content, file_path, created_at
            FROM user_cvs
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(cv_id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<CvSummary>, StoreError> {
        let rows = sqlx::query_as::<_, CvSummary>(
            r#"
            SELECT id, file_name, created_at
            FROM user_cvs
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete(&self, cv_id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let done = sqlx::query("DELETE FROM user_cvs WHERE id = $1 AND user_id = $2")
            .bind(cv_id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
