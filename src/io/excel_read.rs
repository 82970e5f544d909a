use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{DashboardError, Result};
use crate::io::SheetData;
use crate::model::{RawCell, serial_to_date};

/// Reads every worksheet of the workbook, preserving sheet order.
pub fn read_sheets(path: &Path) -> Result<Vec<SheetData>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = read_required_sheet(&mut workbook, &name)?;
        sheets.push(range_to_sheet(name, &range));
    }
    Ok(sheets)
}

/// Reads a single worksheet by name.
pub fn read_sheet(path: &Path, name: &str) -> Result<SheetData> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, name)?;
    Ok(range_to_sheet(name.to_string(), &range))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| DashboardError::MissingSheet(name.to_string()))?;
    let range = range_result.map_err(DashboardError::from)?;
    Ok(range)
}

fn range_to_sheet(name: String, range: &calamine::Range<DataType>) -> SheetData {
    // Ranges start at the first used cell; pad so column 0 stays column A.
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<RawCell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![RawCell::Empty; col_offset];
        cells.extend(row.iter().map(cell_to_raw));
        while matches!(cells.last(), Some(RawCell::Empty)) {
            cells.pop();
        }
        rows.push(cells);
    }
    while matches!(rows.last(), Some(row) if row.is_empty()) {
        rows.pop();
    }

    SheetData { name, rows }
}

fn cell_to_raw(cell: &DataType) -> RawCell {
    match cell {
        DataType::String(value) => RawCell::Text(value.clone()),
        DataType::Float(value) => RawCell::Number(*value),
        DataType::Int(value) => RawCell::Number(*value as f64),
        DataType::Bool(value) => RawCell::Bool(*value),
        DataType::DateTime(serial) => match serial_to_date(*serial) {
            Some(date) if serial.fract() == 0.0 => RawCell::Date(date),
            _ => RawCell::DateTime(*serial),
        },
        DataType::Duration(days) => RawCell::Duration(*days),
        DataType::Empty => RawCell::Empty,
        other => RawCell::Text(other.to_string()),
    }
}
