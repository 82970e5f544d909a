//! Cumulative trend of assets, liabilities and net worth over time.
//!
//! Each table is grouped by exact date and turned into a running total. The
//! two running totals are then outer-joined on date and forward-filled, so a
//! date observed in only one table carries the other table's most recent
//! total. A series stays undefined before its own first observation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::Table;

/// Running total of a table's amounts, ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub points: Vec<(NaiveDate, f64)>,
}

impl CumulativeSeries {
    /// Groups the table by date and takes the prefix sum. Rows without a
    /// date cannot be placed on the axis and are left out.
    pub fn from_table(table: &Table) -> Self {
        let mut per_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in &table.records {
            if let Some(date) = record.date {
                *per_date.entry(date).or_insert(0.0) += record.amount;
            }
        }

        let mut running = 0.0;
        let points = per_date
            .into_iter()
            .map(|(date, amount)| {
                running += amount;
                (date, running)
            })
            .collect();
        Self { points }
    }

    /// Cumulative value recorded on exactly `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by(|(point_date, _)| point_date.cmp(&date))
            .ok()
            .map(|idx| self.points[idx].1)
    }

    fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(date, _)| *date)
    }
}

/// One row of the merged trend. `None` marks an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub assets: Option<f64>,
    pub liabilities: Option<f64>,
    pub net_worth: Option<f64>,
}

/// Date-aligned cumulative assets, liabilities and net worth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedTrend {
    pub points: Vec<TrendPoint>,
    /// Rows from either table that were excluded because their date is null.
    pub undated_rows: usize,
}

impl MergedTrend {
    pub fn reconcile(assets: &Table, liabilities: &Table) -> Self {
        let asset_series = CumulativeSeries::from_table(assets);
        let liability_series = CumulativeSeries::from_table(liabilities);
        debug!(
            asset_dates = asset_series.points.len(),
            liability_dates = liability_series.points.len(),
            "cumulative series built"
        );

        let mut merged = Self::merge(&asset_series, &liability_series);
        merged.undated_rows = assets.undated_count() + liabilities.undated_count();
        if merged.undated_rows > 0 {
            warn!(
                undated_rows = merged.undated_rows,
                "rows with unparseable dates are excluded from the trend"
            );
        }
        merged
    }

    /// Outer-joins two cumulative series on date with forward fill.
    pub fn merge(assets: &CumulativeSeries, liabilities: &CumulativeSeries) -> Self {
        let dates: BTreeSet<NaiveDate> = assets.dates().chain(liabilities.dates()).collect();

        let mut last_assets: Option<f64> = None;
        let mut last_liabilities: Option<f64> = None;
        let points = dates
            .into_iter()
            .map(|date| {
                last_assets = assets.get(date).or(last_assets);
                last_liabilities = liabilities.get(date).or(last_liabilities);
                TrendPoint {
                    date,
                    assets: last_assets,
                    liabilities: last_liabilities,
                    net_worth: last_assets.zip(last_liabilities).map(|(a, l)| a - l),
                }
            })
            .collect();

        Self {
            points,
            undated_rows: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Notice shown next to the trend when undated rows were left out.
    pub fn undated_note(&self) -> String {
        format!(
            "{} baris dengan tanggal tidak valid tidak ditampilkan pada grafik tren.",
            self.undated_rows
        )
    }
}
