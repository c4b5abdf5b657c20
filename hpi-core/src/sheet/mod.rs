//! Spreadsheet loading.
//!
//! The `SheetReader` trait abstracts over the workbook parser so the
//! pipelines can be driven from an in-memory table in tests. `XlsxReader`
//! is the calamine-backed implementation used in production.

mod xlsx;

pub use xlsx::XlsxReader;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single cell value as read from a sheet, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

/// A rectangular row-set with a named header.
///
/// Rows may be shorter than the header; missing trailing cells read as
/// [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

static EMPTY: Cell = Cell::Empty;

impl SheetTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`column_index`](Self::column_index), but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, LoadError> {
        self.column_index(name)
            .ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    /// Cell at `(row, col)`, `Empty` when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// Errors from reading a spreadsheet.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open workbook {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("workbook {} has no sheets", .path.display())]
    NoSheets { path: PathBuf },

    #[error("cannot read sheet '{sheet}' in {}: {reason}", .path.display())]
    Sheet {
        path: PathBuf,
        sheet: String,
        reason: String,
    },

    #[error("no header row after skipping {offset} rows")]
    NoHeader { offset: usize },

    #[error("missing expected column '{column}' (found: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}

/// Capability to parse one sheet of a spreadsheet into a [`SheetTable`].
pub trait SheetReader {
    /// Read `sheet` (or the first sheet when `None`) from `path`, skipping
    /// `header_offset` rows before interpreting the header row.
    fn read(
        &self,
        path: &Path,
        sheet: Option<&str>,
        header_offset: usize,
    ) -> Result<SheetTable, LoadError>;
}

/// Build a table from raw grid rows: skip `header_offset` rows, take the
/// next row as the header and keep every following non-blank row.
///
/// Blank header cells get a positional name (`Unnamed: N`) so the remaining
/// columns keep their positions.
pub fn table_from_grid<I>(grid: I, header_offset: usize) -> Result<SheetTable, LoadError>
where
    I: IntoIterator<Item = Vec<Cell>>,
{
    let mut rows = grid.into_iter().skip(header_offset);
    let header = rows
        .next()
        .ok_or(LoadError::NoHeader {
            offset: header_offset,
        })?;

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Cell::Empty => format!("Unnamed: {i}"),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) => crate::coerce::format_number(*v),
            Cell::Bool(b) => b.to_string(),
        })
        .collect();

    let rows: Vec<Vec<Cell>> = rows
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(SheetTable::new(columns, rows))
}
