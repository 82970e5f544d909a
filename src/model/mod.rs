use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Column names shared by every record table, in sheet order.
pub const COLUMNS: [&str; 4] = ["date", "category", "description", "amount"];

/// A single cell as it comes out of the record store, before any typing is
/// applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawCell {
    /// Free text, including anything the store could not classify.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Native spreadsheet date.
    Date(NaiveDate),
    /// Native date-time or time of day, kept as its serial so no part of it
    /// is lost when the sheet is written back.
    DateTime(f64),
    /// Elapsed time in days, from `[h]:mm`-style formats.
    Duration(f64),
    /// Boolean cell.
    Bool(bool),
    /// Blank cell.
    Empty,
}

impl RawCell {
    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Renders the cell the way a spreadsheet would display it.
    pub fn to_text(&self) -> String {
        match self {
            RawCell::Text(value) => value.clone(),
            RawCell::Number(value) => value.to_string(),
            RawCell::Date(date) => date.format("%Y-%m-%d").to_string(),
            RawCell::DateTime(serial) => match serial_to_datetime(*serial) {
                Some(datetime) if *serial < 1.0 => datetime.format("%H:%M:%S").to_string(),
                Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => serial.to_string(),
            },
            RawCell::Duration(days) => {
                let seconds = (days * SECONDS_PER_DAY).round() as i64;
                format!("{}:{:02}:{:02}", seconds / 3600, seconds % 3600 / 60, seconds % 60)
            }
            RawCell::Bool(value) => value.to_string().to_uppercase(),
            RawCell::Empty => String::new(),
        }
    }
}

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts an Excel 1900-system serial to a date and time of day. Serials
/// below 60 predate Excel's phantom 1900-02-29 and use a shifted epoch.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let millis = (serial * SECONDS_PER_DAY * 1000.0).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Calendar date of a serial. Time-only serials (below 1) have none.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial < 1.0 {
        return None;
    }
    serial_to_datetime(serial).map(|datetime| datetime.date())
}

/// One row of a sheet keyed by the sheet's header row.
pub type RawRecord = BTreeMap<String, RawCell>;

/// The two collections a record can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Assets,
    Liabilities,
}

impl TableKind {
    /// Name of the sheet backing this table in the record store.
    pub fn sheet_name(self) -> &'static str {
        match self {
            TableKind::Assets => "Assets",
            TableKind::Liabilities => "Liabilities",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Assets => "Aset",
            TableKind::Liabilities => "Liabilitas",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed financial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `None` when the stored date could not be parsed.
    pub date: Option<NaiveDate>,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// Ordered records of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub kind: TableKind,
    pub records: Vec<Record>,
}

impl Table {
    /// Creates a table with no rows.
    pub fn empty(kind: TableKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    /// Field names carried by every table, including empty ones.
    pub fn columns(&self) -> [&'static str; 4] {
        COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `amount` over every row, dated or not.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Number of rows whose date could not be parsed.
    pub fn undated_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.date.is_none())
            .count()
    }
}

/// A record submitted through the input form, ready to be appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub kind: TableKind,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

impl NewRecord {
    /// Builds a submission, rejecting negative or non-finite amounts.
    pub fn new(
        kind: TableKind,
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DashboardError::InvalidAmount(amount.to_string()));
        }
        Ok(Self {
            kind,
            date,
            category: category.into(),
            description: description.into(),
            amount,
        })
    }

    /// Row layout expected by the store: ISO date text, category,
    /// description, amount.
    pub fn to_row(&self) -> Vec<RawCell> {
        vec![
            RawCell::Text(self.date.format("%Y-%m-%d").to_string()),
            RawCell::Text(self.category.clone()),
            RawCell::Text(self.description.clone()),
            RawCell::Number(self.amount),
        ]
    }
}
