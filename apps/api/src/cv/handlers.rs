use std::time::Duration;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::links::{create_short_link, ShortLink, EXPIRED_LINK_GRACE};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::cv::{CvSummary, NewSourceDocument};
use crate::parser::extension;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub cv_id: Uuid,
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CvListResponse {
    pub cvs: Vec<CvSummary>,
}

#[derive(Debug, Serialize)]
pub struct CvDetailResponse {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub file_path: String,
    pub cv_text_content: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadLinkResponse {
    pub short_code: String,
    pub expires_in: u64,
}

struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Uploaded file has no file name".to_string()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

fn parse_cv_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| cv_not_found(raw))
}

fn cv_not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("CV {id} not found"))
}

/// POST /api/v1/cv/upload
/// Parses the file before anything is stored; a document without text is never persisted.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CvUploadResponse>), AppError> {
    let upload = read_file_field(&mut multipart).await?;

    let parser = state.parser.clone();
    let (bytes, file_name) = (upload.bytes.clone(), upload.file_name.clone());
    let extracted_text = tokio::task::spawn_blocking(move || parser.parse(&bytes, &file_name))
        .await
        .map_err(|e| AppError::Internal(anyhow!("parser task failed: {e}")))??;

    let storage_path = format!(
        "{}/{}.{}",
        user.id,
        Uuid::new_v4(),
        extension(&upload.file_name)
    );
    state
        .blobs
        .put(&storage_path, upload.bytes, &upload.content_type)
        .await?;

    let new_doc = NewSourceDocument {
        owner: user.id,
        file_name: upload.file_name,
        extracted_text,
        storage_path: storage_path.clone(),
    };
    let doc = match state.cvs.insert(new_doc).await {
        Ok(doc) => doc,
        Err(e) => {
            if let Err(cleanup) = state.blobs.remove(&storage_path).await {
                warn!("Orphaned blob {storage_path} after failed insert: {cleanup}");
            }
            return Err(e.into());
        }
    };

    info!(cv_id = %doc.id, chars = doc.cv_text_content.len(), "CV uploaded");
    Ok((
        StatusCode::CREATED,
        Json(CvUploadResponse {
            cv_id: doc.id,
            file_name: doc.file_name,
            message: "CV uploaded and parsed successfully".to_string(),
        }),
    ))
}

/// GET /api/v1/cv
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CvListResponse>, AppError> {
    let cvs = state.cvs.list(user.id).await?;
    Ok(Json(CvListResponse { cvs }))
}

/// GET /api/v1/cv/:cv_id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<String>,
) -> Result<Json<CvDetailResponse>, AppError> {
    let id = parse_cv_id(&cv_id)?;
    let doc = state
        .cvs
        .get(id, user.id)
        .await?
        .ok_or_else(|| cv_not_found(id))?;

    Ok(Json(CvDetailResponse {
        id: doc.id,
        file_name: doc.file_name,
        created_at: doc.created_at,
        file_path: doc.file_path,
        cv_text_content: doc.cv_text_content,
    }))
}

/// DELETE /api/v1/cv/:cv_id
/// Removes the stored file first; a storage failure does not block deleting the record.
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_cv_id(&cv_id)?;
    let doc = state
        .cvs
        .get(id, user.id)
        .await?
        .ok_or_else(|| cv_not_found(id))?;

    if let Err(e) = state.blobs.remove(&doc.file_path).await {
        warn!(cv_id = %id, "Failed to remove stored CV file, deleting record anyway: {e}");
    }

    if !state.cvs.delete(id, user.id).await? {
        return Err(cv_not_found(id));
    }
    info!(cv_id = %id, "CV deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cv/:cv_id/download
pub async fn handle_create_download_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<String>,
) -> Result<Json<DownloadLinkResponse>, AppError> {
    let id = parse_cv_id(&cv_id)?;
    let doc = state
        .cvs
        .get(id, user.id)
        .await?
        .ok_or_else(|| cv_not_found(id))?;

    let ttl_secs = state.config.download_link_ttl_secs;
    let ttl = Duration::from_secs(ttl_secs);
    let target_url = state.blobs.signed_url(&doc.file_path, ttl).await?;

    let link = ShortLink {
        owner: user.id,
        cv_id: doc.id,
        target_url,
        expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs as i64),
    };
    let short_code = create_short_link(state.links.as_ref(), &link, ttl + EXPIRED_LINK_GRACE).await?;

    info!(cv_id = %id, short_code = %short_code, "Download link created");
    Ok(Json(DownloadLinkResponse {
        short_code,
        expires_in: ttl_secs,
    }))
}

/// GET /dl/:short_code
/// Public: the code itself is the capability.
pub async fn handle_redirect_download(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response, AppError> {
    let link = state
        .links
        .resolve(&short_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Download link not found".to_string()))?;

    if link.is_expired_at(Utc::now()) {
        return Err(AppError::Gone("Download link has expired".to_string()));
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, link.target_url)]).into_response())
}
