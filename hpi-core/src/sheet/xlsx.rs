use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

use super::{table_from_grid, Cell, LoadError, SheetReader, SheetTable};

/// Workbook reader backed by calamine (xlsx, xlsm, xls, ods).
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl XlsxReader {
    pub fn new() -> Self {
        Self
    }
}

impl SheetReader for XlsxReader {
    fn read(
        &self,
        path: &Path,
        sheet: Option<&str>,
        header_offset: usize,
    ) -> Result<SheetTable, LoadError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sheet_name = match sheet {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| LoadError::NoSheets {
                    path: path.to_path_buf(),
                })?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| LoadError::Sheet {
                path: path.to_path_buf(),
                sheet: sheet_name.clone(),
                reason: e.to_string(),
            })?;

        // calamine trims leading empty rows; header_offset counts from the
        // top of the sheet.
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let offset = header_offset.saturating_sub(first_row);
        debug!(
            path = %path.display(),
            sheet = %sheet_name,
            first_row,
            header_offset,
            "reading worksheet"
        );

        let grid = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>());
        table_from_grid(grid, offset)
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}
