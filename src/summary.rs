//! Headline figures and the asset/liability composition.

use serde::{Deserialize, Serialize};

use crate::model::Table;

/// Totals shown in the metric tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    /// Net worth relative to total assets, or `0.0` when there are no assets.
    pub net_worth_percent: f64,
}

impl Summary {
    pub fn from_tables(assets: &Table, liabilities: &Table) -> Self {
        Self::from_totals(assets.total(), liabilities.total())
    }

    pub fn from_totals(total_assets: f64, total_liabilities: f64) -> Self {
        let net_worth = total_assets - total_liabilities;
        let net_worth_percent = if total_assets > 0.0 {
            net_worth / total_assets * 100.0
        } else {
            0.0
        };
        Self {
            total_assets,
            total_liabilities,
            net_worth,
            net_worth_percent,
        }
    }
}

/// One wedge of the composition chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    /// Fill colour as `#RRGGBB`.
    pub color: String,
}

impl PieSlice {
    /// Percentage label with one decimal, e.g. `83.3%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// Assets versus liabilities composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
}

/// Shown in place of the composition chart when there is nothing to chart.
pub const PIE_EMPTY_WARNING: &str = "Tidak ada data untuk membuat pie chart. Pastikan Anda telah memasukkan data aset dan liabilitas.";

pub const ASSETS_COLOR: &str = "#27AE60";
pub const LIABILITIES_COLOR: &str = "#E74C3C";

impl PieChart {
    /// Returns `None` when both totals sum to zero, which the presentation
    /// layer shows as an empty-state warning.
    pub fn compose(summary: &Summary) -> Option<Self> {
        let total = summary.total_assets + summary.total_liabilities;
        if total == 0.0 {
            return None;
        }

        let slice = |label: &str, value: f64, color: &str| PieSlice {
            label: label.to_string(),
            value,
            percent: value / total * 100.0,
            color: color.to_string(),
        };

        Some(Self {
            slices: vec![
                slice("Assets", summary.total_assets, ASSETS_COLOR),
                slice("Liabilities", summary.total_liabilities, LIABILITIES_COLOR),
            ],
        })
    }
}
