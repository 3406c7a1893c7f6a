use anyhow::Context;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::documents::{decode_content, pdf_attachment, stored_content, MessageResponse};
use crate::errors::AppError;
use crate::models::document::{DocumentKind, DocumentSummary};
use crate::models::resume::ResumeContent;
use crate::render::{self, DocumentInfo};
use crate::state::AppState;
use crate::templates::{self, TemplateSummary};

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub success: bool,
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub template: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeResponse {
    pub message: &'static str,
    pub resume_id: Uuid,
}

/// GET /api/resumes/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        success: true,
        templates: templates::list().iter().map(TemplateSummary::from).collect(),
    })
}

/// POST /api/resumes/save
pub async fn handle_save_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let template = req.template.trim();
    if template.is_empty() {
        return Err(AppError::Validation("template is required".to_string()));
    }
    if templates::get(template).is_none() {
        warn!("Rejected résumé with unknown template '{template}'");
        return Err(AppError::Validation(format!("unknown template '{template}'")));
    }

    let content: ResumeContent = decode_content(req.content)?;
    content.validate()?;
    let normalized = serde_json::to_value(&content).context("serializing résumé content")?;

    let resume_id = state
        .documents
        .save_document(DocumentKind::Resume, auth.user_id, &normalized, Some(template))
        .await?;
    info!("Saved résumé {resume_id} for user {}", auth.user_id);

    Ok(Json(SaveResumeResponse {
        message: "Resume saved successfully",
        resume_id,
    }))
}

/// GET /api/resumes/download/:id
pub async fn handle_download_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = state
        .documents
        .load_document(DocumentKind::Resume, id, auth.user_id)
        .await?;
    let content: ResumeContent = stored_content(row.content)?;
    let template = row.template.unwrap_or_default();
    let info = DocumentInfo {
        title: format!("{} - Resume", content.professional_info.name.trim()),
        created_at: row.created_at,
    };

    let bytes = tokio::task::spawn_blocking(move || render::resume_pdf(&content, &template, info))
        .await
        .context("résumé render task failed")??;
    info!("Rendered résumé {id} ({} bytes)", bytes.len());

    Ok(pdf_attachment(format!("resume-{id}.pdf"), bytes))
}

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    let resumes = state
        .documents
        .list_documents(DocumentKind::Resume, auth.user_id)
        .await?;
    Ok(Json(resumes))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .documents
        .delete_document(DocumentKind::Resume, id, auth.user_id)
        .await?;
    info!("Deleted résumé {id} for user {}", auth.user_id);
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully",
    }))
}
