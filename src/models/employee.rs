use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Postgres folds the unquoted column names to lower case.
#[derive(sqlx::FromRow, Serialize, Deserialize, Validate, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "EmployeeID")]
    #[sqlx(rename = "employeeid")]
    pub employee_id: i32,
    #[validate(length(min = 1))]
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[validate(length(min = 1))]
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    #[sqlx(rename = "birthdate")]
    pub birth_date: NaiveDate,
    #[sqlx(rename = "hiredate")]
    pub hire_date: NaiveDate,
}

/// PATCH payload. `null` and a missing key both leave the column untouched.
#[derive(Deserialize, Validate, Debug, Default, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeUpdate {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
}

/// One column assignment of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    FirstName(String),
    LastName(String),
    BirthDate(NaiveDate),
    HireDate(NaiveDate),
}

impl FieldChange {
    pub fn column(&self) -> &'static str {
        match self {
            FieldChange::FirstName(_) => "FirstName",
            FieldChange::LastName(_) => "LastName",
            FieldChange::BirthDate(_) => "BirthDate",
            FieldChange::HireDate(_) => "HireDate",
        }
    }
}

impl EmployeeUpdate {
    /// Present fields, always in FirstName, LastName, BirthDate, HireDate order.
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::with_capacity(4);
        if let Some(first_name) = &self.first_name {
            changes.push(FieldChange::FirstName(first_name.clone()));
        }
        if let Some(last_name) = &self.last_name {
            changes.push(FieldChange::LastName(last_name.clone()));
        }
        if let Some(birth_date) = self.birth_date {
            changes.push(FieldChange::BirthDate(birth_date));
        }
        if let Some(hire_date) = self.hire_date {
            changes.push(FieldChange::HireDate(hire_date));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ana() -> Employee {
        Employee {
            employee_id: 7,
            first_name: "Ana".to_string(),
            last_name: "Li".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
        }
    }

    #[test]
    fn employee_serializes_with_boundary_names_and_iso_dates() {
        let value = serde_json::to_value(ana()).unwrap();
        assert_eq!(
            value,
            json!({
                "EmployeeID": 7,
                "FirstName": "Ana",
                "LastName": "Li",
                "BirthDate": "1990-01-01",
                "HireDate": "2020-06-15"
            })
        );
    }

    #[test]
    fn employee_parses_request_body() {
        let body = r#"{"EmployeeID":7,"FirstName":"Ana","LastName":"Li","BirthDate":"1990-01-01","HireDate":"2020-06-15"}"#;
        let employee: Employee = serde_json::from_str(body).unwrap();
        assert_eq!(employee, ana());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let body = r#"{"EmployeeID":7,"FirstName":"Ana","LastName":"Li","BirthDate":"01/01/1990","HireDate":"2020-06-15"}"#;
        assert!(serde_json::from_str::<Employee>(body).is_err());
    }

    #[test]
    fn empty_names_fail_validation() {
        let mut employee = ana();
        employee.first_name = String::new();
        assert!(employee.validate().is_err());
        assert!(ana().validate().is_ok());
    }

    #[test]
    fn update_treats_null_as_absent() {
        let update: EmployeeUpdate =
            serde_json::from_str(r#"{"FirstName": null, "HireDate": null}"#).unwrap();
        assert!(update.changes().is_empty());

        let update: EmployeeUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.changes().is_empty());
    }

    #[test]
    fn changes_follow_fixed_column_order() {
        let update: EmployeeUpdate = serde_json::from_str(
            r#"{"HireDate": "2021-02-03", "FirstName": "Bo", "LastName": "Ng"}"#,
        )
        .unwrap();
        let columns: Vec<_> = update.changes().iter().map(FieldChange::column).collect();
        assert_eq!(columns, vec!["FirstName", "LastName", "HireDate"]);
    }

    #[test]
    fn present_but_empty_name_fails_validation() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"LastName": ""}"#).unwrap();
        assert!(update.validate().is_err());
    }
}
