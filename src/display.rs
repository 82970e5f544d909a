//! Plain-text rendering of the dashboard for the terminal.

use std::fmt::Write;

use crate::dashboard::DashboardState;
use crate::model::Table;
use crate::summary::{PIE_EMPTY_WARNING, Summary};
use crate::trend::MergedTrend;

/// Formats an amount as rupiah with thousands separators and no decimals,
/// e.g. `Rp 1,250,000`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (idx, digit) in rounded.chars().enumerate() {
        if idx > 0 && (rounded.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && rounded != "0" { "-" } else { "" };
    format!("Rp {sign}{grouped}")
}

/// Formats the net-worth delta, e.g. `80.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// The three metric tiles.
pub fn render_metrics(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<18}{}", "Total Aset", format_rupiah(summary.total_assets));
    let _ = writeln!(
        out,
        "{:<18}{}",
        "Total Liabilitas",
        format_rupiah(summary.total_liabilities)
    );
    let _ = writeln!(
        out,
        "{:<18}{} ({})",
        "Net Worth",
        format_rupiah(summary.net_worth),
        format_percent(summary.net_worth_percent)
    );
    out
}

/// The full dashboard: tiles, composition, trend and raw tables.
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard Keuangan Pribadi");
    let _ = writeln!(out);
    out.push_str(&render_metrics(&state.summary));

    let _ = writeln!(out);
    let _ = writeln!(out, "Rasio Aset vs Liabilitas");
    match &state.pie {
        Some(pie) => {
            for slice in &pie.slices {
                let _ = writeln!(out, "  {:<14}{:>7}", slice.label, slice.percent_label());
            }
        }
        None => {
            let _ = writeln!(out, "  {PIE_EMPTY_WARNING}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Tren Keuangan dari Waktu ke Waktu");
    out.push_str(&render_trend(&state.trend));

    for table in [&state.assets, &state.liabilities] {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", table.kind.label());
        out.push_str(&render_table(table));
    }
    out
}

fn render_trend(trend: &MergedTrend) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<12}{:>20}{:>20}{:>20}",
        "date", "Assets", "Liabilities", "Net Worth"
    );
    for point in &trend.points {
        let _ = writeln!(
            out,
            "  {:<12}{:>20}{:>20}{:>20}",
            point.date.format("%Y-%m-%d").to_string(),
            optional_amount(point.assets),
            optional_amount(point.liabilities),
            optional_amount(point.net_worth)
        );
    }
    if trend.undated_rows > 0 {
        let _ = writeln!(out, "  {}", trend.undated_note());
    }
    out
}

fn optional_amount(value: Option<f64>) -> String {
    value.map(format_rupiah).unwrap_or_else(|| "-".to_string())
}

fn render_table(table: &Table) -> String {
    let mut out = String::new();
    let columns = table.columns();
    let _ = writeln!(
        out,
        "  {:<12}{:<20}{:<30}{:>16}",
        columns[0], columns[1], columns[2], columns[3]
    );
    for record in &table.records {
        let date = record
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<12}{:<20}{:<30}{:>16}",
            date,
            record.category,
            record.description,
            format!("{:.2}", record.amount)
        );
    }
    out
}
