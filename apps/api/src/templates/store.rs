//! Template store.
//!
//! `PgTemplateStore` is the production implementation. The activation
//! invariant (at most one active template per company) is enforced by a
//! single transaction spanning the deactivate-all and activate-one writes —
//! only the atomic `activate` is public, never the two underlying steps.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{NewTemplate, TemplateRow};

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Persists a new template. Always a new row: version starts at 1 and
    /// re-uploads under the same name do not overwrite. New templates are
    /// inactive until `activate` is called.
    async fn upload(&self, new: NewTemplate) -> Result<TemplateRow, AppError>;

    /// Atomically makes `template_id` the company's only active template.
    /// Fails with `NotFound` when the template does not belong to the company.
    async fn activate(&self, company_id: Uuid, template_id: Uuid) -> Result<(), AppError>;

    /// Fetches a template scoped to its owning company.
    async fn get(&self, company_id: Uuid, template_id: Uuid) -> Result<TemplateRow, AppError>;

    /// Returns the unique active template, if any was ever activated.
    async fn get_active(&self, company_id: Uuid) -> Result<Option<TemplateRow>, AppError>;

    /// All templates for a company, newest first.
    async fn list(&self, company_id: Uuid) -> Result<Vec<TemplateRow>, AppError>;
}

/// Upload-time validation shared by every implementation.
pub fn validate_new_template(new: &NewTemplate) -> Result<(), AppError> {
    if new.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Template name cannot be blank".to_string(),
        ));
    }
    if new.content.is_empty() {
        return Err(AppError::Validation(
            "Template content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        PgTemplateStore { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn upload(&self, new: NewTemplate) -> Result<TemplateRow, AppError> {
        validate_new_template(&new)?;

        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO templates
                (id, company_id, name, file_name, content, size_bytes,
                 description, version, is_active, uploaded_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 1, false, $8, now(), now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.company_id)
        .bind(&new.name)
        .bind(&new.file_name)
        .bind(&new.content)
        .bind(new.size_bytes)
        .bind(&new.description)
        .bind(&new.uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Uploaded template {} ({} bytes) for company {}",
            row.id, row.size_bytes, row.company_id
        );
        Ok(row)
    }

    async fn activate(&self, company_id: Uuid, template_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE templates SET is_active = false, updated_at = now() WHERE company_id = $1")
            .bind(company_id)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query(
            "UPDATE templates SET is_active = true, updated_at = now() WHERE id = $1 AND company_id = $2",
        )
        .bind(template_id)
        .bind(company_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls back the deactivate-all step.
            return Err(AppError::NotFound(format!(
                "Template {template_id} not found for company {company_id}"
            )));
        }

        tx.commit().await?;
        info!("Activated template {template_id} for company {company_id}");
        Ok(())
    }

    async fn get(&self, company_id: Uuid, template_id: Uuid) -> Result<TemplateRow, AppError> {
        sqlx::query_as::<_, TemplateRow>(
            "SELECT * FROM templates WHERE id = $1 AND company_id = $2",
        )
        .bind(template_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Template {template_id} not found for company {company_id}"
            ))
        })
    }

    async fn get_active(&self, company_id: Uuid) -> Result<Option<TemplateRow>, AppError> {
        Ok(sqlx::query_as::<_, TemplateRow>(
            "SELECT * FROM templates WHERE company_id = $1 AND is_active = true",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<TemplateRow>, AppError> {
        Ok(sqlx::query_as::<_, TemplateRow>(
            "SELECT * FROM templates WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
