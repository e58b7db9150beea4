//! Best-effort CSV load into `Employees`.
//!
//! The batch runs in one transaction on one connection. Each row is inserted
//! under its own savepoint so a rejected row (duplicate key, unparsable date)
//! is rolled back alone and the rest of the batch still commits.

pub mod error;
pub mod reader;

use std::io;
use std::path::Path;

use log::{error, info};
use sqlx::postgres::PgConnection;
use sqlx::Connection;

use crate::db::{self, ConnectionFactory};

pub use error::IngestError;
pub use reader::{CsvRow, EmployeeCsv, REQUIRED_COLUMNS};

// Values arrive as text; the casts leave conversion to the store.
const INSERT_CSV_ROW: &str = "INSERT INTO Employees (EmployeeID, FirstName, LastName, BirthDate, HireDate) \
     VALUES (CAST($1 AS INTEGER), $2, $3, CAST($4 AS DATE), CAST($5 AS DATE))";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub rows_seen: usize,
    pub rows_inserted: usize,
}

/// Loads `csv_path` into the store. The header row is checked before any
/// connection is opened.
pub async fn ingest(
    factory: &ConnectionFactory,
    csv_path: impl AsRef<Path>,
) -> Result<IngestReport, IngestError> {
    let mut csv = EmployeeCsv::from_path(csv_path)?;
    ingest_rows(factory, &mut csv).await
}

pub async fn ingest_rows<R: io::Read>(
    factory: &ConnectionFactory,
    csv: &mut EmployeeCsv<R>,
) -> Result<IngestReport, IngestError> {
    let mut conn = factory.open_connection().await?;
    let result = insert_batch(&mut conn, csv).await;
    db::close_connection(conn).await;

    let report = result?;
    info!(
        "Data ingestion completed successfully. {} of {} rows inserted",
        report.rows_inserted, report.rows_seen
    );
    Ok(report)
}

async fn insert_batch<R: io::Read>(
    conn: &mut PgConnection,
    csv: &mut EmployeeCsv<R>,
) -> Result<IngestReport, IngestError> {
    let mut tx = conn.begin().await.map_err(IngestError::Transaction)?;
    let mut report = IngestReport::default();

    for (index, row) in csv.rows().enumerate() {
        report.rows_seen += 1;
        match row {
            Ok(row) => match insert_row(&mut tx, &row).await {
                Ok(()) => report.rows_inserted += 1,
                Err(err) => error!("Error inserting row {} into database: {}", index, err),
            },
            Err(err) => error!("Error reading row {} from CSV: {}", index, err),
        }
    }

    tx.commit().await.map_err(IngestError::Commit)?;
    Ok(report)
}

async fn insert_row(conn: &mut PgConnection, row: &CsvRow) -> Result<(), sqlx::Error> {
    let mut savepoint = conn.begin().await?;
    let result = sqlx::query(INSERT_CSV_ROW)
        .bind(&row.employee_id)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.birth_date)
        .bind(&row.hire_date)
        .execute(&mut *savepoint)
        .await;
    db::employee::finish(savepoint, result).await.map(|_| ())
}
