// src/process/table.rs

use std::io::{Cursor, Write};

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;

use crate::error::Result;

/// An in-memory table: ordered column names from the header row plus raw
/// string rows, exactly as the file shipped them. No typing, no schema.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, if declared by the header row.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell lookup by row index and column name. Ragged rows come back as
    /// None past their last field.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Append another table's rows, keeping this table's column order.
    /// An empty accumulator adopts the incoming columns.
    pub fn append(&mut self, mut other: Table) {
        if self.columns.is_empty() {
            self.columns = other.columns;
        }
        self.rows.append(&mut other.rows);
    }

    /// Serialize back out as comma-delimited text, header row first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Parse comma-delimited bytes into a [`Table`].
///
/// CFTC data files are comma-delimited even when shipped as .txt. The
/// first record is the header row. Row widths are not enforced; historical
/// files are occasionally ragged and are passed through as-is.
pub fn parse_table(raw: &[u8]) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(raw));

    let columns = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);
    for record in rdr.records() {
        let record = record?;
        table.rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}
