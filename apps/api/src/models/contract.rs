use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated contract. Content is immutable after creation — regeneration
/// inserts a new row rather than mutating this one.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContractRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub company_id: Uuid,
    pub template_id: Uuid,
    pub template_name: String,
    pub file_name: String,
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    pub status: String,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contract lifecycle states as stored in the `status` column.
pub mod status {
    pub const ACTIVE: &str = "active";
    #[allow(dead_code)]
    pub const ARCHIVED: &str = "archived";
    #[allow(dead_code)]
    pub const EXPIRED: &str = "expired";
}
