use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartLine, ChartPoint, ChartSolidFill, ChartType, Format, Workbook,
    Worksheet,
};

use crate::dashboard::DashboardState;
use crate::error::Result;
use crate::io::SheetData;
use crate::model::{COLUMNS, RawCell, Table};
use crate::summary::{PIE_EMPTY_WARNING, PieChart};
use crate::trend::MergedTrend;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const TIME_FORMAT: &str = "hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";
const MONEY_FORMAT: &str = "#,##0";

const DASHBOARD_SHEET: &str = "Dashboard";
const TREND_SHEET: &str = "Tren";

pub const TREND_EMPTY_NOTE: &str = "Belum ada data bertanggal untuk grafik tren.";

/// Number formats that make calamine read a serial back as the same kind of
/// cell it was written from.
struct SerialFormats {
    date: Format,
    datetime: Format,
    time: Format,
    duration: Format,
}

impl SerialFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
            time: Format::new().set_num_format(TIME_FORMAT),
            duration: Format::new().set_num_format(DURATION_FORMAT),
        }
    }
}

/// Writes the provided sheets to the given path, one worksheet each.
pub fn write_sheets(path: &Path, sheets: &[SheetData]) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = SerialFormats::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_idx as u32, col_idx as u16, cell, &formats)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &RawCell,
    formats: &SerialFormats,
) -> Result<()> {
    match cell {
        RawCell::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        RawCell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        RawCell::Date(date) => {
            worksheet.write_number_with_format(row, col, excel_serial(*date), &formats.date)?;
        }
        RawCell::DateTime(serial) => {
            let format = if *serial < 1.0 {
                &formats.time
            } else {
                &formats.datetime
            };
            worksheet.write_number_with_format(row, col, *serial, format)?;
        }
        RawCell::Duration(days) => {
            worksheet.write_number_with_format(row, col, *days, &formats.duration)?;
        }
        RawCell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        RawCell::Empty => {}
    }
    Ok(())
}

/// Days since the Excel epoch (1899-12-30 in the 1900 date system).
fn excel_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (date - epoch).num_days() as f64
}

/// Writes the rendered dashboard: metric tiles and charts on the first
/// sheet, chart data on the trend sheet, then both raw tables.
pub fn write_dashboard(path: &Path, state: &DashboardState) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DASHBOARD_SHEET)?;
    write_overview(worksheet, state)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TREND_SHEET)?;
    write_trend_data(worksheet, &state.trend)?;

    for table in [&state.assets, &state.liabilities] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.kind.label())?;
        write_table(worksheet, table)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_overview(worksheet: &mut Worksheet, state: &DashboardState) -> Result<()> {
    let title = Format::new().set_bold().set_font_size(16);
    let heading = Format::new().set_bold();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let percent = Format::new().set_num_format("0.00\"%\"");

    worksheet.set_column_width(0, 18.0)?;
    worksheet.set_column_width(1, 18.0)?;
    worksheet.set_column_width(2, 18.0)?;
    worksheet.set_column_width(3, 18.0)?;

    worksheet.write_string_with_format(0, 0, "Dashboard Keuangan Pribadi", &title)?;

    let summary = &state.summary;
    worksheet.write_string_with_format(2, 0, "Total Aset (Rp)", &heading)?;
    worksheet.write_string_with_format(2, 1, "Total Liabilitas (Rp)", &heading)?;
    worksheet.write_string_with_format(2, 2, "Net Worth (Rp)", &heading)?;
    worksheet.write_string_with_format(2, 3, "Net Worth %", &heading)?;
    worksheet.write_number_with_format(3, 0, summary.total_assets, &money)?;
    worksheet.write_number_with_format(3, 1, summary.total_liabilities, &money)?;
    worksheet.write_number_with_format(3, 2, summary.net_worth, &money)?;
    worksheet.write_number_with_format(3, 3, summary.net_worth_percent, &percent)?;

    worksheet.write_string_with_format(5, 0, "Rasio Aset vs Liabilitas", &heading)?;
    match &state.pie {
        Some(pie) => write_pie(worksheet, pie, &money)?,
        None => {
            worksheet.write_string(6, 0, PIE_EMPTY_WARNING)?;
        }
    }

    worksheet.write_string_with_format(5, 8, "Tren Keuangan dari Waktu ke Waktu", &heading)?;
    if state.trend.is_empty() {
        worksheet.write_string(6, 8, TREND_EMPTY_NOTE)?;
    } else {
        let chart = trend_chart(state.trend.len() as u32);
        worksheet.insert_chart(9, 8, &chart)?;
    }
    if state.trend.undated_rows > 0 {
        worksheet.write_string(7, 8, state.trend.undated_note())?;
    }

    Ok(())
}

fn write_pie(worksheet: &mut Worksheet, pie: &PieChart, money: &Format) -> Result<()> {
    let first_row = 6;
    for (offset, slice) in pie.slices.iter().enumerate() {
        let row = first_row + offset as u32;
        worksheet.write_string(row, 0, &slice.label)?;
        worksheet.write_number_with_format(row, 1, slice.value, money)?;
    }
    let last_row = first_row + pie.slices.len() as u32 - 1;

    let points: Vec<ChartPoint> = pie
        .slices
        .iter()
        .map(|slice| {
            ChartPoint::new().set_format(ChartSolidFill::new().set_color(slice.color.as_str()))
        })
        .collect();

    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_name("Komposisi")
        .set_categories((DASHBOARD_SHEET, first_row, 0, last_row, 0))
        .set_values((DASHBOARD_SHEET, first_row, 1, last_row, 1))
        .set_points(&points)
        .set_data_label(ChartDataLabel::new().show_percentage());
    chart.title().set_name("Rasio Aset vs Liabilitas");

    worksheet.insert_chart(9, 0, &chart)?;
    Ok(())
}

fn trend_chart(point_count: u32) -> Chart {
    let mut chart = Chart::new(ChartType::Line);
    let series = [
        (1u16, "Assets", "#27AE60"),
        (2u16, "Liabilities", "#E74C3C"),
        (3u16, "Net Worth", "#2980B9"),
    ];
    for (col, name, color) in series {
        chart
            .add_series()
            .set_name(name)
            .set_categories((TREND_SHEET, 1, 0, point_count, 0))
            .set_values((TREND_SHEET, 1, col, point_count, col))
            .set_format(ChartLine::new().set_color(color));
    }
    chart.title().set_name("Cumulative Financial Trend");
    chart.x_axis().set_name("Tanggal");
    chart
}

fn write_trend_data(worksheet: &mut Worksheet, trend: &MergedTrend) -> Result<()> {
    let heading = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let money = Format::new().set_num_format(MONEY_FORMAT);

    let headers = ["date", "Cumulative Assets", "Cumulative Liabilities", "Net Worth"];
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, *header, &heading)?;
    }
    worksheet.set_column_width(0, 12.0)?;

    for (idx, point) in trend.points.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_number_with_format(row, 0, excel_serial(point.date), &date_format)?;
        let values = [point.assets, point.liabilities, point.net_worth];
        for (offset, value) in values.into_iter().enumerate() {
            // Undefined values stay blank so the chart shows a gap.
            if let Some(value) = value {
                worksheet.write_number_with_format(row, offset as u16 + 1, value, &money)?;
            }
        }
    }
    Ok(())
}

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    let heading = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    for (col_idx, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, *header, &heading)?;
    }
    worksheet.set_column_width(0, 12.0)?;
    worksheet.set_column_width(2, 30.0)?;

    for (idx, record) in table.records.iter().enumerate() {
        let row = idx as u32 + 1;
        if let Some(date) = record.date {
            worksheet.write_number_with_format(row, 0, excel_serial(date), &date_format)?;
        }
        worksheet.write_string(row, 1, &record.category)?;
        worksheet.write_string(row, 2, &record.description)?;
        worksheet.write_number(row, 3, record.amount)?;
    }
    Ok(())
}
