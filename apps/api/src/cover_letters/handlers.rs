use anyhow::Context;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::documents::{decode_content, pdf_attachment, stored_content, MessageResponse};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterContent;
use crate::models::document::{DocumentKind, DocumentSummary};
use crate::render::{self, DocumentInfo};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveCoverLetterRequest {
    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCoverLetterResponse {
    pub message: &'static str,
    pub letter_id: Uuid,
}

/// POST /api/cover-letters/save
pub async fn handle_save_cover_letter(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SaveCoverLetterRequest>,
) -> Result<Json<SaveCoverLetterResponse>, AppError> {
    let content: CoverLetterContent = decode_content(req.content)?;
    content.validate()?;
    let normalized = serde_json::to_value(&content).context("serializing cover letter")?;

    let letter_id = state
        .documents
        .save_document(DocumentKind::CoverLetter, auth.user_id, &normalized, None)
        .await?;
    info!("Saved cover letter {letter_id} for user {}", auth.user_id);

    Ok(Json(SaveCoverLetterResponse {
        message: "Cover letter saved successfully",
        letter_id,
    }))
}

/// GET /api/cover-letters/download/:id
pub async fn handle_download_cover_letter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = state
        .documents
        .load_document(DocumentKind::CoverLetter, id, auth.user_id)
        .await?;
    let content: CoverLetterContent = stored_content(row.content)?;
    let info = DocumentInfo {
        title: format!("{} - Cover Letter", content.user_info.name.trim()),
        created_at: row.created_at,
    };

    let bytes = tokio::task::spawn_blocking(move || render::cover_letter_pdf(&content, info))
        .await
        .context("cover letter render task failed")??;
    info!("Rendered cover letter {id} ({} bytes)", bytes.len());

    Ok(pdf_attachment(format!("cover-letter-{id}.pdf"), bytes))
}

/// GET /api/cover-letters
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    let letters = state
        .documents
        .list_documents(DocumentKind::CoverLetter, auth.user_id)
        .await?;
    Ok(Json(letters))
}

/// DELETE /api/cover-letters/:id
pub async fn handle_delete_cover_letter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .documents
        .delete_document(DocumentKind::CoverLetter, id, auth.user_id)
        .await?;
    info!("Deleted cover letter {id} for user {}", auth.user_id);
    Ok(Json(MessageResponse {
        message: "Cover letter deleted successfully",
    }))
}
