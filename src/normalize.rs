//! Conversion of raw store rows into typed [`Table`]s.
//!
//! Normalization never fails: an unparseable date becomes `None` and an
//! unparseable amount becomes `0.0`. Rows are never dropped.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{RawCell, RawRecord, Record, Table, TableKind, serial_to_date};

const ISO_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const ISO_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DAY_FIRST_FORMATS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d %B %Y", "%d %b %Y"];
const DAY_FIRST_SHORT_YEAR_FORMATS: [&str; 5] =
    ["%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d %B %y", "%d %b %y"];
const MONTH_FIRST_FORMATS: [&str; 2] = ["%m/%d/%Y", "%m-%d-%Y"];
const MONTH_FIRST_SHORT_YEAR_FORMATS: [&str; 2] = ["%m/%d/%y", "%m-%d-%y"];

/// Builds a typed table from the raw records of one sheet.
pub fn normalize_table(kind: TableKind, raw: &[RawRecord]) -> Table {
    if raw.is_empty() {
        return Table::empty(kind);
    }

    let records = raw.iter().map(normalize_record).collect();
    Table { kind, records }
}

/// Types a single row. Missing keys behave like blank cells.
pub fn normalize_record(raw: &RawRecord) -> Record {
    Record {
        date: raw.get("date").and_then(parse_date),
        category: text_field(raw, "category"),
        description: text_field(raw, "description"),
        amount: raw.get("amount").map(parse_amount).unwrap_or(0.0),
    }
}

/// Parses a date cell, preferring day-first readings of ambiguous text.
pub fn parse_date(cell: &RawCell) -> Option<NaiveDate> {
    match cell {
        RawCell::Date(date) => Some(*date),
        RawCell::DateTime(serial) => serial_to_date(*serial),
        RawCell::Text(text) => parse_date_text(text.trim()),
        RawCell::Number(_) | RawCell::Duration(_) | RawCell::Bool(_) | RawCell::Empty => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    // chrono's `%Y` also takes one or two digits, so the year width picks
    // the format family before any parse is attempted.
    let iso = if leading_digits(text) == 4 {
        parse_with(text, &ISO_DATE_FORMATS).or_else(|| {
            ISO_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
    } else {
        None
    };

    let (day_first, month_first): (&[&str], &[&str]) = match trailing_digits(text) {
        4 => (&DAY_FIRST_FORMATS[..], &MONTH_FIRST_FORMATS[..]),
        2 => (
            &DAY_FIRST_SHORT_YEAR_FORMATS[..],
            &MONTH_FIRST_SHORT_YEAR_FORMATS[..],
        ),
        _ => (&[], &[]),
    };

    iso.or_else(|| parse_with(text, day_first))
        .or_else(|| parse_with(text, month_first))
}

fn parse_with(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn leading_digits(text: &str) -> usize {
    text.chars().take_while(char::is_ascii_digit).count()
}

fn trailing_digits(text: &str) -> usize {
    text.chars().rev().take_while(char::is_ascii_digit).count()
}

/// Parses an amount cell; anything non-numeric or non-finite yields `0.0`.
pub fn parse_amount(cell: &RawCell) -> f64 {
    let value = match cell {
        RawCell::Number(value) => *value,
        RawCell::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        RawCell::Date(_)
        | RawCell::DateTime(_)
        | RawCell::Duration(_)
        | RawCell::Bool(_)
        | RawCell::Empty => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

fn text_field(raw: &RawRecord, key: &str) -> String {
    raw.get(key).map(RawCell::to_text).unwrap_or_default()
}
