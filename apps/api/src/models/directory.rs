//! Read-only rows from the HR directory (employees, employments, companies).
//! These tables are owned by the CRUD side of the application; the engine
//! only ever reads them to build the variable dictionary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmploymentRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub job_title: String,
    pub department: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub currency: Option<String>,
    pub employment_type: Option<String>,
    pub working_hours: Option<f64>,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
}
