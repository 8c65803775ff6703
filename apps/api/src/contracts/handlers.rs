//! Axum route handlers for the Contract API.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Response,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use uuid::Uuid;

use crate::contracts::generate::{generate_contract, GenerateParams};
use crate::errors::AppError;
use crate::models::contract::ContractRow;
use crate::render::docx::DOCX_CONTENT_TYPE;
use crate::state::AppState;
use crate::templates::handlers::attachment;

#[derive(Debug, Deserialize)]
pub struct GenerateContractRequest {
    pub employee_id: Uuid,
    /// Optional: the company's active template is used when absent.
    pub template_id: Option<Uuid>,
    pub template_name: Option<String>,
    /// Base64-encoded template binary. Optional: when absent the stored
    /// template row is used.
    pub content: Option<String>,
}

/// POST /api/v1/contracts/generate
///
/// Runs the full pipeline and streams the rendered DOCX back. The id of the
/// newly created contract rides along in the `x-contract-id` header.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateContractRequest>,
) -> Result<Response, AppError> {
    let content = match &request.content {
        Some(encoded) if !encoded.is_empty() => Some(BASE64.decode(encoded).map_err(|e| {
            AppError::Validation(format!("Template content is not valid base64: {e}"))
        })?),
        _ => None,
    };

    let contract = generate_contract(
        &state.db,
        state.store.as_ref(),
        GenerateParams {
            employee_id: request.employee_id,
            template_id: request.template_id,
            content,
            template_name: request.template_name,
        },
    )
    .await?;

    let mut response = attachment(
        DOCX_CONTENT_TYPE,
        &contract.file_name,
        contract.content.clone(),
    );
    if let Ok(value) = HeaderValue::from_str(&contract.id.to_string()) {
        response.headers_mut().insert("x-contract-id", value);
    }
    Ok(response)
}

/// GET /api/v1/contracts/:contract_id/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let contract =
        sqlx::query_as::<_, ContractRow>("SELECT * FROM contracts WHERE id = $1")
            .bind(contract_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contract {contract_id} not found")))?;

    Ok(attachment(
        DOCX_CONTENT_TYPE,
        &contract.file_name,
        contract.content,
    ))
}
