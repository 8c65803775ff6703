use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted contract template, owned by a company.
///
/// Invariant: at most one row per `company_id` has `is_active = true` at any
/// observable time. Only `TemplateStore::activate` may flip the flag.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TemplateRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub file_name: String,
    /// Raw uploaded bytes. Never exposed in list responses.
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    pub size_bytes: i64,
    pub description: Option<String>,
    pub version: i32,
    pub is_active: bool,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a new template row.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub company_id: Uuid,
    pub name: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub size_bytes: i64,
    pub description: Option<String>,
    pub uploaded_by: String,
}
