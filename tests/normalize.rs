use chrono::NaiveDate;
use finance_report::model::{RawCell, RawRecord, TableKind};
use finance_report::normalize::{normalize_table, parse_amount, parse_date};

fn text(value: &str) -> RawCell {
    RawCell::Text(value.to_string())
}

fn raw(date: RawCell, amount: RawCell) -> RawRecord {
    let mut record = RawRecord::new();
    record.insert("date".to_string(), date);
    record.insert("category".to_string(), text("Tabungan"));
    record.insert("description".to_string(), text("BCA"));
    record.insert("amount".to_string(), amount);
    record
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn empty_input_yields_empty_table_with_columns() {
    let table = normalize_table(TableKind::Assets, &[]);

    assert!(table.is_empty());
    assert_eq!(table.kind, TableKind::Assets);
    assert_eq!(table.columns(), ["date", "category", "description", "amount"]);
}

#[test]
fn non_numeric_amounts_default_to_zero() {
    let rows = vec![
        raw(text("2024-01-01"), text("banyak")),
        raw(text("2024-01-02"), RawCell::Empty),
        raw(text("2024-01-03"), text("1,000")),
        raw(text("2024-01-04"), text("NaN")),
        raw(text("2024-01-05"), RawCell::Date(ymd(2024, 1, 5))),
    ];

    let table = normalize_table(TableKind::Liabilities, &rows);

    assert_eq!(table.len(), 5);
    assert!(table.records.iter().all(|record| record.amount == 0.0));
}

#[test]
fn numeric_text_and_number_cells_are_parsed() {
    assert_eq!(parse_amount(&RawCell::Number(1500.5)), 1500.5);
    assert_eq!(parse_amount(&text(" 250000 ")), 250000.0);
    assert_eq!(parse_amount(&text("12.75")), 12.75);
}

#[test]
fn dates_are_read_day_first() {
    assert_eq!(parse_date(&text("01/02/2024")), Some(ymd(2024, 2, 1)));
    assert_eq!(parse_date(&text("15-03-2024")), Some(ymd(2024, 3, 15)));
    assert_eq!(parse_date(&text("7.8.2023")), Some(ymd(2023, 8, 7)));
    assert_eq!(parse_date(&text("5 January 2024")), Some(ymd(2024, 1, 5)));
}

#[test]
fn two_digit_years_are_read_day_first() {
    assert_eq!(parse_date(&text("01/02/24")), Some(ymd(2024, 2, 1)));
    assert_eq!(parse_date(&text("05-06-23")), Some(ymd(2023, 6, 5)));
    assert_eq!(parse_date(&text("31.12.99")), Some(ymd(1999, 12, 31)));
    assert_eq!(parse_date(&text("12/31/24")), Some(ymd(2024, 12, 31)));
}

#[test]
fn short_years_are_never_taken_literally() {
    assert_eq!(parse_date(&text("24/02/01")), Some(ymd(2001, 2, 24)));
    assert_eq!(parse_date(&text("1/2/3")), None);
    assert_eq!(parse_date(&text("01/02/024")), None);
}

#[test]
fn native_serial_cells_give_their_calendar_date() {
    assert_eq!(parse_date(&RawCell::DateTime(45292.75)), Some(ymd(2024, 1, 1)));
    assert_eq!(parse_date(&RawCell::DateTime(0.5)), None);
    assert_eq!(parse_date(&RawCell::Duration(2.0)), None);
    assert_eq!(parse_date(&RawCell::Bool(true)), None);
    assert_eq!(parse_amount(&RawCell::Bool(true)), 0.0);
}

#[test]
fn iso_dates_take_precedence() {
    assert_eq!(parse_date(&text("2024-01-02")), Some(ymd(2024, 1, 2)));
    assert_eq!(parse_date(&text("2024-01-02 13:45:00")), Some(ymd(2024, 1, 2)));
    assert_eq!(parse_date(&RawCell::Date(ymd(2023, 12, 31))), Some(ymd(2023, 12, 31)));
}

#[test]
fn impossible_day_first_falls_back_to_month_first() {
    assert_eq!(parse_date(&text("12/31/2024")), Some(ymd(2024, 12, 31)));
}

#[test]
fn unparseable_dates_become_null_and_rows_are_kept() {
    let rows = vec![
        raw(text("kemarin"), RawCell::Number(10.0)),
        raw(RawCell::Empty, RawCell::Number(20.0)),
        raw(RawCell::Number(45000.0), RawCell::Number(30.0)),
        raw(text("2024-01-01"), RawCell::Number(40.0)),
    ];

    let table = normalize_table(TableKind::Assets, &rows);

    assert_eq!(table.len(), 4);
    assert_eq!(table.undated_count(), 3);
    assert_eq!(table.total(), 100.0);
}

#[test]
fn text_fields_pass_through_and_missing_keys_default() {
    let mut record = RawRecord::new();
    record.insert("category".to_string(), RawCell::Number(42.0));

    let table = normalize_table(TableKind::Assets, &[record]);
    let row = &table.records[0];

    assert_eq!(row.category, "42");
    assert_eq!(row.description, "");
    assert_eq!(row.date, None);
    assert_eq!(row.amount, 0.0);
}
