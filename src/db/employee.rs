//! Statements against the `Employees` table.
//!
//! Writes run in their own transaction: committed on success, rolled back
//! explicitly when the statement fails.

use log::warn;
use sqlx::postgres::{PgConnection, Postgres};
use sqlx::{Connection, QueryBuilder, Transaction};

use crate::models::employee::{Employee, EmployeeUpdate, FieldChange};

const SELECT_EMPLOYEE: &str = "SELECT EmployeeID, FirstName, LastName, BirthDate, HireDate FROM Employees WHERE EmployeeID = $1";
const INSERT_EMPLOYEE: &str = "INSERT INTO Employees (EmployeeID, FirstName, LastName, BirthDate, HireDate) VALUES ($1, $2, $3, $4, $5)";
const UPDATE_EMPLOYEE: &str = "UPDATE Employees SET FirstName = $1, LastName = $2, BirthDate = $3, HireDate = $4 WHERE EmployeeID = $5";
const DELETE_EMPLOYEE: &str = "DELETE FROM Employees WHERE EmployeeID = $1";

pub async fn fetch_employee(
    conn: &mut PgConnection,
    employee_id: i32,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(SELECT_EMPLOYEE)
        .bind(employee_id)
        .fetch_optional(conn)
        .await
}

pub async fn insert_employee(conn: &mut PgConnection, employee: &Employee) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;
    let result = sqlx::query(INSERT_EMPLOYEE)
        .bind(employee.employee_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .execute(&mut *tx)
        .await;
    finish(tx, result).await.map(|_| ())
}

/// Overwrites every non-key column. Returns the number of rows touched,
/// which is zero when the id does not exist.
pub async fn update_employee(conn: &mut PgConnection, employee: &Employee) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let result = sqlx::query(UPDATE_EMPLOYEE)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(employee.employee_id)
        .execute(&mut *tx)
        .await;
    finish(tx, result).await.map(|done| done.rows_affected())
}

pub async fn patch_employee(
    conn: &mut PgConnection,
    mut query: QueryBuilder<'static, Postgres>,
) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let result = query.build().execute(&mut *tx).await;
    finish(tx, result).await.map(|done| done.rows_affected())
}

pub async fn delete_employee(conn: &mut PgConnection, employee_id: i32) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let result = sqlx::query(DELETE_EMPLOYEE)
        .bind(employee_id)
        .execute(&mut *tx)
        .await;
    finish(tx, result).await.map(|done| done.rows_affected())
}

/// Builds `UPDATE Employees SET ... WHERE EmployeeID = $n` from the fields
/// present in `update`. Returns `None` when there is nothing to set.
pub fn patch_query(employee_id: i32, update: &EmployeeUpdate) -> Option<QueryBuilder<'static, Postgres>> {
    let changes = update.changes();
    if changes.is_empty() {
        return None;
    }

    let mut query: QueryBuilder<'static, Postgres> = QueryBuilder::new("UPDATE Employees SET ");
    let mut set_clauses = query.separated(", ");
    for change in changes {
        set_clauses.push(format!("{} = ", change.column()));
        match change {
            FieldChange::FirstName(value) | FieldChange::LastName(value) => {
                set_clauses.push_bind_unseparated(value);
            }
            FieldChange::BirthDate(value) | FieldChange::HireDate(value) => {
                set_clauses.push_bind_unseparated(value);
            }
        }
    }
    query.push(" WHERE EmployeeID = ");
    query.push_bind(employee_id);
    Some(query)
}

pub(crate) async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, sqlx::Error>,
) -> Result<T, sqlx::Error> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
