//! The record store: where Assets and Liabilities rows live between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{DashboardError, Result};
use crate::io::{SheetData, excel_read, excel_write};
use crate::model::{COLUMNS, RawCell, RawRecord, TableKind};

/// Row-oriented access to named sheets.
pub trait RecordStore {
    /// Returns every data row of `sheet` keyed by its header row.
    fn fetch_all(&self, sheet: &str) -> Result<Vec<RawRecord>>;

    /// Appends one row after the last row of `sheet`.
    fn append_row(&mut self, sheet: &str, row: Vec<RawCell>) -> Result<()>;
}

fn header_row() -> Vec<RawCell> {
    COLUMNS
        .iter()
        .map(|column| RawCell::Text(column.to_string()))
        .collect()
}

/// A record store backed by an `.xlsx` workbook on disk.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    path: PathBuf,
}

impl WorkbookStore {
    /// Opens an existing workbook.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(DashboardError::MissingInput(path));
        }
        Ok(Self { path })
    }

    /// Creates a new workbook holding empty Assets and Liabilities sheets.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(DashboardError::StoreExists(path.to_path_buf()));
        }

        let sheets: Vec<SheetData> = [TableKind::Assets, TableKind::Liabilities]
            .into_iter()
            .map(|kind| SheetData {
                name: kind.sheet_name().to_string(),
                rows: vec![header_row()],
            })
            .collect();
        excel_write::write_sheets(path, &sheets)?;
        info!("record store created");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for WorkbookStore {
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    fn fetch_all(&self, sheet: &str) -> Result<Vec<RawRecord>> {
        let data = excel_read::read_sheet(&self.path, sheet)?;
        let records = data.records();
        info!(row_count = records.len(), "fetched rows");
        Ok(records)
    }

    #[instrument(level = "info", skip(self, row), fields(path = %self.path.display()))]
    fn append_row(&mut self, sheet: &str, row: Vec<RawCell>) -> Result<()> {
        let mut sheets = excel_read::read_sheets(&self.path)?;
        let target = sheets
            .iter_mut()
            .find(|data| data.name == sheet)
            .ok_or_else(|| DashboardError::MissingSheet(sheet.to_string()))?;

        if target.rows.is_empty() {
            target.rows.push(header_row());
        }
        target.rows.push(row);
        debug!(sheet_rows = target.rows.len(), "row appended in memory");

        // Write beside the store first so a failed save leaves it intact.
        let staging = self.path.with_extension("xlsx.tmp");
        excel_write::write_sheets(&staging, &sheets)?;
        std::fs::rename(&staging, &self.path)?;
        info!("workbook rewritten");
        Ok(())
    }
}

/// An in-process record store, mainly for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<String, SheetData>,
}

impl MemoryStore {
    /// Creates a store with empty Assets and Liabilities sheets.
    pub fn new() -> Self {
        let mut store = Self::default();
        for kind in [TableKind::Assets, TableKind::Liabilities] {
            store.add_sheet(kind.sheet_name(), vec![header_row()]);
        }
        store
    }

    /// Inserts or replaces a sheet with the given rows, header first.
    pub fn add_sheet(&mut self, name: &str, rows: Vec<Vec<RawCell>>) {
        self.sheets.insert(
            name.to_string(),
            SheetData {
                name: name.to_string(),
                rows,
            },
        );
    }

    fn sheet(&self, name: &str) -> Result<&SheetData> {
        self.sheets
            .get(name)
            .ok_or_else(|| DashboardError::MissingSheet(name.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self, sheet: &str) -> Result<Vec<RawRecord>> {
        Ok(self.sheet(sheet)?.records())
    }

    fn append_row(&mut self, sheet: &str, row: Vec<RawCell>) -> Result<()> {
        let target = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| DashboardError::MissingSheet(sheet.to_string()))?;
        if target.rows.is_empty() {
            target.rows.push(header_row());
        }
        target.rows.push(row);
        Ok(())
    }
}
