//! Header-checked access to the employee CSV.

use std::fs::File;
use std::io;
use std::path::Path;

use super::error::IngestError;

/// Columns every input file must carry; any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["EmployeeID", "FirstName", "LastName", "BirthDate", "HireDate"];

/// One data row, fields kept as text. The store converts them on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub hire_date: String,
}

pub struct EmployeeCsv<R> {
    reader: csv::Reader<R>,
    // Position of each REQUIRED_COLUMNS entry in the header row.
    columns: [usize; 5],
}

impl EmployeeCsv<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::from_reader(reader)
    }
}

impl<R: io::Read> EmployeeCsv<R> {
    /// Fails with [`IngestError::SchemaMismatch`] listing every absent column.
    pub fn from_reader(mut reader: csv::Reader<R>) -> Result<Self, IngestError> {
        let headers = reader.headers()?.clone();

        let mut columns = [0usize; 5];
        let mut missing = Vec::new();
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|h| h == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(IngestError::SchemaMismatch {
                missing,
                headers: headers.iter().map(String::from).collect(),
            });
        }

        Ok(EmployeeCsv { reader, columns })
    }

    /// Remaining data rows. A malformed record yields an `Err` for that row
    /// only; iteration continues with the next one.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<CsvRow, csv::Error>> + '_ {
        let columns = self.columns;
        self.reader.records().map(move |record| {
            record.map(|record| {
                let field = |i: usize| record.get(columns[i]).unwrap_or("").to_string();
                CsvRow {
                    employee_id: field(0),
                    first_name: field(1),
                    last_name: field(2),
                    birth_date: field(3),
                    hire_date: field(4),
                }
            })
        })
    }
}
