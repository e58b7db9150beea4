use actix_web::{web, HttpResponse};
use log::{debug, error};

use crate::db::{self, employee as store, ConnectionFactory};
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeUpdate};
use crate::utils::validation::validate_payload;

fn not_found() -> AppError {
    AppError::NotFound("Employee not found".to_string())
}

fn read_failed(err: sqlx::Error) -> AppError {
    error!("Error reading employee: {}", err);
    AppError::DatabaseError(err.to_string())
}

pub async fn get_employee(
    factory: web::Data<ConnectionFactory>,
    employee_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();

    let mut conn = factory.open_connection().await?;
    let row = store::fetch_employee(&mut conn, employee_id).await;
    db::close_connection(conn).await;

    match row.map_err(read_failed)? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(not_found()),
    }
}

pub async fn create_employee(
    factory: web::Data<ConnectionFactory>,
    employee: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*employee)?;
    let employee = employee.into_inner();

    let mut conn = factory.open_connection().await?;
    let result = store::insert_employee(&mut conn, &employee).await;
    db::close_connection(conn).await;

    result.map_err(|err| {
        error!("Error inserting employee {}: {}", employee.employee_id, err);
        AppError::InsertError(err.to_string())
    })?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Overwrites every column for `EmployeeID`. A missing row is not an error:
/// the statement touches nothing and the payload is echoed back.
pub async fn update_employee(
    factory: web::Data<ConnectionFactory>,
    employee: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*employee)?;
    let employee = employee.into_inner();

    let mut conn = factory.open_connection().await?;
    let result = store::update_employee(&mut conn, &employee).await;
    db::close_connection(conn).await;

    let touched = result.map_err(|err| {
        error!("Error updating employee {}: {}", employee.employee_id, err);
        AppError::UpdateError(err.to_string())
    })?;
    if touched == 0 {
        debug!("Full update matched no row for employee {}", employee.employee_id);
    }

    Ok(HttpResponse::Ok().json(employee))
}

/// Sets only the fields present in the body, then re-reads the row.
///
/// The re-read is a separate statement after commit, so a concurrent delete
/// in between yields 404 even though the update itself went through.
pub async fn patch_employee(
    factory: web::Data<ConnectionFactory>,
    employee_id: web::Path<i32>,
    updates: web::Json<EmployeeUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*updates)?;
    let employee_id = employee_id.into_inner();

    let query = store::patch_query(employee_id, &updates).ok_or(AppError::NoFieldsError)?;
    debug!("Partial update: {}", query.sql());

    let mut conn = factory.open_connection().await?;
    if let Err(err) = store::patch_employee(&mut conn, query).await {
        db::close_connection(conn).await;
        error!("Error updating employee {}: {}", employee_id, err);
        return Err(AppError::UpdateError(err.to_string()));
    }

    let row = store::fetch_employee(&mut conn, employee_id).await;
    db::close_connection(conn).await;

    match row.map_err(read_failed)? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(not_found()),
    }
}

/// Returns the row as it was just before deletion.
pub async fn delete_employee(
    factory: web::Data<ConnectionFactory>,
    employee_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();

    let mut conn = factory.open_connection().await?;
    let snapshot = match store::fetch_employee(&mut conn, employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            db::close_connection(conn).await;
            return Err(not_found());
        }
        Err(err) => {
            db::close_connection(conn).await;
            return Err(read_failed(err));
        }
    };

    let result = store::delete_employee(&mut conn, employee_id).await;
    db::close_connection(conn).await;

    result.map_err(|err| {
        error!("Error deleting employee {}: {}", employee_id, err);
        AppError::DeleteError(err.to_string())
    })?;

    Ok(HttpResponse::Ok().json(snapshot))
}
