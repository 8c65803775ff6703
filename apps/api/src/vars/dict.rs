//! Variable dictionary construction.
//!
//! Flattens an employee, their (optional) current employment, and the company
//! into flat string values, plus the two computed values every template gets
//! for free. The dictionary is rebuilt on every generation request and never
//! persisted.

use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeMap;

use crate::models::directory::{CompanyRow, EmployeeRow, EmploymentRow};

/// Request-scoped placeholder key → rendered value mapping.
/// BTreeMap so iteration (and therefore substitution) is deterministic.
pub type VariableDict = BTreeMap<String, String>;

const DATE_FORMAT: &str = "%d/%m/%Y";

fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Absent values render as the empty string, never "null" or "undefined".
fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_date(value: &Option<NaiveDate>) -> String {
    value.map(fmt_date).unwrap_or_default()
}

fn opt_num(value: &Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Builds the flat dictionary for one generation request.
pub fn build_dictionary(
    employee: &EmployeeRow,
    employment: Option<&EmploymentRow>,
    company: &CompanyRow,
) -> VariableDict {
    let mut dict = VariableDict::new();
    let mut put = |k: &str, v: String| {
        dict.insert(k.to_string(), v);
    };

    // Employee
    put("firstName", employee.first_name.clone());
    put("lastName", employee.last_name.clone());
    put(
        "fullName",
        format!("{} {}", employee.first_name, employee.last_name),
    );
    put("email", employee.email.clone());
    put("phone", opt_str(&employee.phone));
    put("address", opt_str(&employee.address));
    put("dateOfBirth", opt_date(&employee.date_of_birth));

    // Employment (may be absent for a not-yet-started employee)
    put(
        "jobTitle",
        employment.map(|e| e.job_title.clone()).unwrap_or_default(),
    );
    put(
        "department",
        employment.map(|e| opt_str(&e.department)).unwrap_or_default(),
    );
    put(
        "startDate",
        employment.map(|e| fmt_date(e.start_date)).unwrap_or_default(),
    );
    put(
        "endDate",
        employment.map(|e| opt_date(&e.end_date)).unwrap_or_default(),
    );
    put(
        "salary",
        employment.map(|e| opt_num(&e.salary)).unwrap_or_default(),
    );
    put(
        "currency",
        employment.map(|e| opt_str(&e.currency)).unwrap_or_default(),
    );
    put(
        "employmentType",
        employment
            .map(|e| opt_str(&e.employment_type))
            .unwrap_or_default(),
    );
    put(
        "workingHours",
        employment
            .map(|e| opt_num(&e.working_hours))
            .unwrap_or_default(),
    );
    // List-valued fields render as comma-joined text
    put(
        "benefits",
        employment.map(|e| e.benefits.join(", ")).unwrap_or_default(),
    );

    // Company
    put("companyName", company.name.clone());
    put("companyAddress", opt_str(&company.address));
    put("companyEmail", opt_str(&company.email));
    put("companyPhone", opt_str(&company.phone));
    put("companyRegistrationNumber", opt_str(&company.registration_number));

    // Computed
    let today = Local::now().date_naive();
    put("currentDate", fmt_date(today));
    put("currentYear", today.year().to_string());

    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_employee() -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@acme.test".to_string(),
            phone: None,
            address: Some("1 Main St".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 2, 14),
        }
    }

    fn make_employment(employee_id: Uuid) -> EmploymentRow {
        EmploymentRow {
            id: Uuid::new_v4(),
            employee_id,
            job_title: "Engineer".to_string(),
            department: Some("Platform".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: None,
            salary: Some(50000.0),
            currency: Some("EUR".to_string()),
            employment_type: Some("full_time".to_string()),
            working_hours: Some(40.0),
            benefits: vec!["health".to_string(), "gym".to_string()],
        }
    }

    fn make_company(id: Uuid) -> CompanyRow {
        CompanyRow {
            id,
            name: "Acme Ltd".to_string(),
            address: None,
            email: Some("hr@acme.test".to_string()),
            phone: None,
            registration_number: None,
        }
    }

    #[test]
    fn test_flattens_all_three_records() {
        let employee = make_employee();
        let employment = make_employment(employee.id);
        let company = make_company(employee.company_id);
        let dict = build_dictionary(&employee, Some(&employment), &company);

        assert_eq!(dict["firstName"], "Jane");
        assert_eq!(dict["fullName"], "Jane Doe");
        assert_eq!(dict["jobTitle"], "Engineer");
        assert_eq!(dict["companyName"], "Acme Ltd");
    }

    #[test]
    fn test_dates_render_locale_formatted() {
        let employee = make_employee();
        let employment = make_employment(employee.id);
        let company = make_company(employee.company_id);
        let dict = build_dictionary(&employee, Some(&employment), &company);

        assert_eq!(dict["startDate"], "01/06/2024");
        assert_eq!(dict["dateOfBirth"], "14/02/1990");
    }

    #[test]
    fn test_list_fields_comma_joined() {
        let employee = make_employee();
        let employment = make_employment(employee.id);
        let company = make_company(employee.company_id);
        let dict = build_dictionary(&employee, Some(&employment), &company);

        assert_eq!(dict["benefits"], "health, gym");
    }

    #[test]
    fn test_absent_values_render_empty_never_null() {
        let employee = make_employee();
        let company = make_company(employee.company_id);
        let dict = build_dictionary(&employee, None, &company);

        assert_eq!(dict["phone"], "");
        assert_eq!(dict["jobTitle"], "");
        assert_eq!(dict["endDate"], "");
        for value in dict.values() {
            assert_ne!(value, "null");
            assert_ne!(value, "undefined");
        }
    }

    #[test]
    fn test_computed_values_present() {
        let employee = make_employee();
        let company = make_company(employee.company_id);
        let dict = build_dictionary(&employee, None, &company);

        assert!(!dict["currentDate"].is_empty());
        assert_eq!(dict["currentYear"].len(), 4);
    }
}
