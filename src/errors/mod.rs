use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::db::ConnectionError;

#[derive(Debug)]
pub enum AppError {
    ConnectionError,
    NotFound(String),
    NoFieldsError,
    BadRequest(String),
    InsertError(String),
    UpdateError(String),
    DeleteError(String),
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConnectionError => write!(f, "Database connection error"),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::NoFieldsError => write!(f, "No fields to update"),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::InsertError(msg) => write!(f, "Error inserting into database: {}", msg),
            AppError::UpdateError(msg) => write!(f, "Error updating database: {}", msg),
            AppError::DeleteError(msg) => write!(f, "Error deleting from database: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Error reading from database: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NoFieldsError | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConnectionError
            | AppError::InsertError(_)
            | AppError::UpdateError(_)
            | AppError::DeleteError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: self.to_string() })
    }
}

// The cause is logged by the factory; clients only learn the store is unreachable.
impl From<ConnectionError> for AppError {
    fn from(_: ConnectionError) -> Self {
        AppError::ConnectionError
    }
}
