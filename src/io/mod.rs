//! Spreadsheet adapters: reading and writing `.xlsx` workbooks and the record
//! store abstraction built on top of them.

pub mod excel_read;
pub mod excel_write;
pub mod store;

use crate::model::{RawCell, RawRecord};

/// Cell contents of one worksheet, header row included.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<RawCell>>,
}

impl SheetData {
    /// Header names taken from the first row, trimmed.
    pub fn headers(&self) -> Vec<String> {
        match self.rows.first() {
            Some(first_row) => first_row
                .iter()
                .map(|cell| cell.to_text().trim().to_string())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Rows below the header keyed by header name. Fully blank rows and
    /// columns without a header are skipped; short rows are padded with
    /// [`RawCell::Empty`].
    pub fn records(&self) -> Vec<RawRecord> {
        let headers = self.headers();
        if headers.is_empty() {
            return Vec::new();
        }

        self.rows
            .iter()
            .skip(1)
            .filter(|row| !row.iter().all(RawCell::is_blank))
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .filter(|(_, header)| !header.is_empty())
                    .map(|(col_idx, header)| {
                        let cell = row.get(col_idx).cloned().unwrap_or(RawCell::Empty);
                        (header.clone(), cell)
                    })
                    .collect()
            })
            .collect()
    }
}
