use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(describe)
}

// "FirstName: length" style, one entry per failing field, sorted for stable output.
fn describe(errors: ValidationErrors) -> AppError {
    let mut details = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes = errs
                .iter()
                .map(|e| e.code.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", json_name(field), codes)
        })
        .collect::<Vec<_>>();
    details.sort();
    AppError::BadRequest(format!("Validation failed: {}", details.join("; ")))
}

// validator keys errors by Rust field name; clients only know the JSON names.
fn json_name(field: &str) -> &str {
    match field {
        "employee_id" => "EmployeeID",
        "first_name" => "FirstName",
        "last_name" => "LastName",
        "birth_date" => "BirthDate",
        "hire_date" => "HireDate",
        other => other,
    }
}
