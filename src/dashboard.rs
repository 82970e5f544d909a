use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::io::excel_write;
use crate::io::store::RecordStore;
use crate::model::{NewRecord, Table, TableKind};
use crate::normalize::normalize_table;
use crate::summary::{PieChart, Summary};
use crate::trend::MergedTrend;

/// Everything the dashboard displays, computed from one read of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub assets: Table,
    pub liabilities: Table,
    pub summary: Summary,
    /// `None` when there is nothing to chart.
    pub pie: Option<PieChart>,
    pub trend: MergedTrend,
}

impl DashboardState {
    /// Fetches both tables and derives every figure. Store failures abort
    /// the load.
    #[instrument(level = "info", skip_all)]
    pub fn load<S: RecordStore + ?Sized>(store: &S) -> Result<Self> {
        let assets = load_table(store, TableKind::Assets)?;
        let liabilities = load_table(store, TableKind::Liabilities)?;
        let state = Self::from_tables(assets, liabilities);
        info!(
            assets = state.assets.len(),
            liabilities = state.liabilities.len(),
            trend_points = state.trend.len(),
            "dashboard state loaded"
        );
        Ok(state)
    }

    /// Derives the dashboard from already-normalized tables.
    pub fn from_tables(assets: Table, liabilities: Table) -> Self {
        let summary = Summary::from_tables(&assets, &liabilities);
        let pie = PieChart::compose(&summary);
        let trend = MergedTrend::reconcile(&assets, &liabilities);
        Self {
            assets,
            liabilities,
            summary,
            pie,
            trend,
        }
    }

    /// Writes the dashboard workbook with charts to `output`.
    #[instrument(level = "info", skip_all, fields(output = %output.display()))]
    pub fn render_workbook(&self, output: &Path) -> Result<()> {
        excel_write::write_dashboard(output, self)
    }
}

fn load_table<S: RecordStore + ?Sized>(store: &S, kind: TableKind) -> Result<Table> {
    let raw = store.fetch_all(kind.sheet_name())?;
    let table = normalize_table(kind, &raw);
    debug!(%kind, rows = table.len(), undated = table.undated_count(), "table normalized");
    Ok(table)
}

/// Appends a submitted record to its table, then reloads the dashboard so
/// the caller sees the new row reflected everywhere.
#[instrument(level = "info", skip_all, fields(kind = %record.kind))]
pub fn submit<S: RecordStore + ?Sized>(store: &mut S, record: &NewRecord) -> Result<DashboardState> {
    store.append_row(record.kind.sheet_name(), record.to_row())?;
    info!("record appended");
    DashboardState::load(&*store)
}
