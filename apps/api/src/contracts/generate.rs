//! Contract generation pipeline.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::contract::{status, ContractRow};
use crate::models::directory::{CompanyRow, EmployeeRow, EmploymentRow};
use crate::render::docx::render_docx;
use crate::templates::store::TemplateStore;
use crate::vars::{build_dictionary, substitute};

pub struct GenerateParams {
    pub employee_id: Uuid,
    /// Template to use. When absent, the company's active template is used.
    pub template_id: Option<Uuid>,
    /// Request-supplied template binary. When absent the stored template row
    /// is used instead.
    pub content: Option<Vec<u8>>,
    pub template_name: Option<String>,
}

/// Runs the full pipeline and persists the resulting contract.
///
/// Persistence happens strictly after rendering succeeds, so a render failure
/// never leaves a partial contract behind.
pub async fn generate_contract(
    pool: &PgPool,
    store: &dyn TemplateStore,
    params: GenerateParams,
) -> Result<ContractRow, AppError> {
    let employee = fetch_employee(pool, params.employee_id).await?;
    let company = fetch_company(pool, employee.company_id).await?;
    let employment = fetch_latest_employment(pool, employee.id).await?;

    let (template_id, template_name, content) = match (params.template_id, params.content) {
        (Some(id), Some(content)) if !content.is_empty() => (
            id,
            params.template_name.unwrap_or_else(|| "template".to_string()),
            content,
        ),
        (maybe_id, _) => {
            let template = match maybe_id {
                Some(id) => store.get(employee.company_id, id).await?,
                None => store.get_active(employee.company_id).await?.ok_or_else(|| {
                    AppError::NotFound(format!(
                        "No active template for company {}",
                        employee.company_id
                    ))
                })?,
            };
            if template.content.is_empty() {
                return Err(AppError::Validation(
                    "Template content is missing".to_string(),
                ));
            }
            (template.id, template.name, template.content)
        }
    };

    let text = extract_text(&content);
    let dict = build_dictionary(&employee, employment.as_ref(), &company);
    let substituted = substitute(&text, &dict);

    let rendered = render_docx(&substituted).map_err(|e| AppError::Render(e.to_string()))?;

    let file_name = contract_file_name(&employee);
    let contract = insert_contract(
        pool,
        &employee,
        template_id,
        &template_name,
        &file_name,
        &rendered,
    )
    .await?;

    info!(
        "Generated contract {} for employee {} from template {}",
        contract.id, employee.id, template_id
    );
    Ok(contract)
}

/// Attachment filename derived from the employee's name.
pub fn contract_file_name(employee: &EmployeeRow) -> String {
    format!("{}_{}_contract.docx", employee.first_name, employee.last_name).replace(' ', "_")
}

async fn fetch_employee(pool: &PgPool, employee_id: Uuid) -> Result<EmployeeRow, AppError> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))
}

async fn fetch_company(pool: &PgPool, company_id: Uuid) -> Result<CompanyRow, AppError> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))
}

async fn fetch_latest_employment(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<Option<EmploymentRow>, AppError> {
    Ok(sqlx::query_as::<_, EmploymentRow>(
        "SELECT * FROM employments WHERE employee_id = $1 ORDER BY start_date DESC LIMIT 1",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?)
}

async fn insert_contract(
    pool: &PgPool,
    employee: &EmployeeRow,
    template_id: Uuid,
    template_name: &str,
    file_name: &str,
    content: &[u8],
) -> Result<ContractRow, AppError> {
    Ok(sqlx::query_as::<_, ContractRow>(
        r#"
        INSERT INTO contracts
            (id, employee_id, company_id, template_id, template_name,
             file_name, content, status, generated_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now(), now(), now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee.id)
    .bind(employee.company_id)
    .bind(template_id)
    .bind(template_name)
    .bind(file_name)
    .bind(content)
    .bind(status::ACTIVE)
    .fetch_one(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docx_rs::{Docx, Paragraph, Run};

    #[test]
    fn test_pipeline_end_to_end_without_persistence() {
        // A real DOCX template with placeholders, through extraction,
        // substitution and re-rendering.
        let mut docx = Docx::new();
        docx = docx.add_paragraph(Paragraph::new().add_run(
            Run::new().add_text("Dear {{firstName}} {{lastName}},"),
        ));
        docx = docx.add_paragraph(Paragraph::new().add_run(
            Run::new().add_text("You start on {{start_date}} at {{COMPANYNAME}}."),
        ));
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack template");

        let employee = EmployeeRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@acme.test".to_string(),
            phone: None,
            address: None,
            date_of_birth: None,
        };
        let employment = EmploymentRow {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            job_title: "Engineer".to_string(),
            department: None,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            salary: None,
            currency: None,
            employment_type: None,
            working_hours: None,
            benefits: vec![],
        };
        let company = CompanyRow {
            id: employee.company_id,
            name: "Acme Ltd".to_string(),
            address: None,
            email: None,
            phone: None,
            registration_number: None,
        };

        let text = extract_text(&cursor.into_inner());
        let dict = build_dictionary(&employee, Some(&employment), &company);
        let substituted = substitute(&text, &dict);
        let rendered = render_docx(&substituted).expect("render");

        let round_trip = extract_text(&rendered);
        assert!(round_trip.contains("Dear Jane Doe,"));
        assert!(round_trip.contains("You start on 01/06/2024 at Acme Ltd."));
        assert!(!round_trip.contains("{{"));
    }

    #[test]
    fn test_contract_file_name_derived_from_employee() {
        let employee = EmployeeRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "van Doe".to_string(),
            email: "jane@acme.test".to_string(),
            phone: None,
            address: None,
            date_of_birth: None,
        };
        assert_eq!(contract_file_name(&employee), "Jane_van_Doe_contract.docx");
    }
}
