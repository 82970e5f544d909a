//! Core library for the finance-report personal finance dashboard.
//!
//! Records live in a spreadsheet with an `Assets` and a `Liabilities` sheet.
//! Store adapters live under [`io`], the typed records in [`model`], row
//! typing in [`normalize`], the headline figures in [`summary`], the
//! cumulative trend in [`trend`], and the load/submit orchestration in
//! [`dashboard`]. [`display`] renders the dashboard as text; the workbook
//! renderer with charts is [`io::excel_write::write_dashboard`].

pub mod dashboard;
pub mod display;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod summary;
pub mod trend;

pub use dashboard::{DashboardState, submit};
pub use error::{DashboardError, Result};
pub use io::store::{MemoryStore, RecordStore, WorkbookStore};
