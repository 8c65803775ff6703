//! Axum route handlers for the Template API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::template::{NewTemplate, TemplateRow};
use crate::render::pdf::{render_pdf, PDF_CONTENT_TYPE};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CompanyIdQuery {
    pub company_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UploadTemplateRequest {
    pub name: String,
    pub file_name: Option<String>,
    pub description: Option<String>,
    /// Base64-encoded template binary.
    pub content: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by: Option<String>,
    /// When true the template becomes the company's active one immediately.
    #[serde(default)]
    pub activate: bool,
}

/// Streams a rendered binary back as an attachment download.
pub(crate) fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    (headers, Bytes::from(body)).into_response()
}

/// POST /api/v1/companies/:company_id/templates
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(request): Json<UploadTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Template name cannot be blank".to_string(),
        ));
    }
    if request.content.is_empty() {
        return Err(AppError::Validation(
            "Template content cannot be empty".to_string(),
        ));
    }

    let content = BASE64
        .decode(&request.content)
        .map_err(|e| AppError::Validation(format!("Template content is not valid base64: {e}")))?;

    let size_bytes = request.size_bytes.unwrap_or(content.len() as i64);
    let new = NewTemplate {
        company_id,
        name: request.name,
        file_name: request
            .file_name
            .unwrap_or_else(|| "template.docx".to_string()),
        content,
        size_bytes,
        description: request.description,
        uploaded_by: request.uploaded_by.unwrap_or_else(|| "system".to_string()),
    };

    let template = state.store.upload(new).await?;
    if request.activate {
        state.store.activate(company_id, template.id).await?;
    }

    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/companies/:company_id/templates
pub async fn handle_list(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let templates = state.store.list(company_id).await?;
    Ok(Json(templates))
}

/// POST /api/v1/companies/:company_id/templates/:template_id/activate
pub async fn handle_activate(
    State(state): State<AppState>,
    Path((company_id, template_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state.store.activate(company_id, template_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/templates/:template_id/preview?company_id=…
///
/// Fixed-layout rendering of the template's extracted text, streamed directly
/// and never persisted.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    Query(params): Query<CompanyIdQuery>,
) -> Result<Response, AppError> {
    let template = state.store.get(params.company_id, template_id).await?;
    if template.content.is_empty() {
        return Err(AppError::Validation(
            "Template has no content to render".to_string(),
        ));
    }

    let text = extract_text(&template.content);
    let pdf = render_pdf(&text, &state.layout).map_err(|e| AppError::Render(e.to_string()))?;

    let file_name = format!("{}.pdf", template.name.replace(' ', "_"));
    Ok(attachment(PDF_CONTENT_TYPE, &file_name, pdf))
}
