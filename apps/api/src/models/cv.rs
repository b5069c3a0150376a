use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded CV: the original file in blob storage plus its extracted text.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SourceDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub cv_text_content: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSourceDocument {
    pub owner: Uuid,
    pub file_name: String,
    pub extracted_text: String,
    pub storage_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CvSummary {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}
