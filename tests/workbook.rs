use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use finance_report::io::SheetData;
use finance_report::io::{excel_read, excel_write};
use finance_report::model::{NewRecord, RawCell, TableKind};
use finance_report::summary::PIE_EMPTY_WARNING;
use finance_report::{DashboardError, DashboardState, RecordStore, WorkbookStore, submit};
use rust_xlsxwriter::{Format, Workbook};
use tempfile::tempdir;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn created_store_has_both_sheets_with_headers() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");

    let store = WorkbookStore::create(&path).expect("store created");
    let sheets = excel_read::read_sheets(store.path()).expect("workbook read");

    let names: Vec<&str> = sheets.iter().map(|sheet| sheet.name.as_str()).collect();
    assert_eq!(names, vec!["Assets", "Liabilities"]);
    assert_eq!(
        sheets[0].headers(),
        vec!["date", "category", "description", "amount"]
    );
    assert!(store.fetch_all("Assets").expect("rows fetched").is_empty());
}

#[test]
fn create_refuses_to_overwrite() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");
    WorkbookStore::create(&path).expect("store created");

    let result = WorkbookStore::create(&path);
    assert!(matches!(result, Err(DashboardError::StoreExists(_))));
}

#[test]
fn open_reports_missing_store() {
    let temp_dir = tempdir().expect("temporary directory");
    let result = WorkbookStore::open(temp_dir.path().join("absent.xlsx"));
    assert!(matches!(result, Err(DashboardError::MissingInput(_))));
}

#[test]
fn appended_record_survives_refetch() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");
    let mut store = WorkbookStore::create(&path).expect("store created");

    let first = NewRecord::new(TableKind::Assets, ymd(2024, 1, 1), "Tabungan", "BCA", 100.0)
        .expect("valid record");
    let second = NewRecord::new(TableKind::Assets, ymd(2024, 1, 3), "Saham", "BBRI", 50.5)
        .expect("valid record");
    submit(&mut store, &first).expect("first record submitted");
    let state = submit(&mut store, &second).expect("second record submitted");

    let reopened = WorkbookStore::open(&path).expect("store reopened");
    let reloaded = DashboardState::load(&reopened).expect("dashboard loaded");
    assert_eq!(reloaded, state);

    let records = &reloaded.assets.records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].date, Some(ymd(2024, 1, 3)));
    assert_eq!(records[1].category, "Saham");
    assert_eq!(records[1].description, "BBRI");
    assert_eq!(records[1].amount, 50.5);
    assert!(reloaded.liabilities.is_empty());
    assert_eq!(reloaded.summary.total_assets, 150.5);
}

#[test]
fn append_preserves_other_sheets() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");

    let header: Vec<RawCell> = ["date", "category", "description", "amount"]
        .iter()
        .map(|name| RawCell::Text(name.to_string()))
        .collect();
    let notes = SheetData {
        name: "Catatan".to_string(),
        rows: vec![vec![RawCell::Text("bebas".to_string()), RawCell::Number(7.0)]],
    };
    let sheets = vec![
        SheetData {
            name: "Assets".to_string(),
            rows: vec![header.clone()],
        },
        SheetData {
            name: "Liabilities".to_string(),
            rows: vec![
                header,
                vec![
                    RawCell::Text("02/01/2024".to_string()),
                    RawCell::Text("KPR".to_string()),
                    RawCell::Text("Cicilan".to_string()),
                    RawCell::Number(30.0),
                ],
            ],
        },
        notes.clone(),
    ];
    excel_write::write_sheets(&path, &sheets).expect("workbook written");

    let mut store = WorkbookStore::open(&path).expect("store opened");
    store
        .append_row(
            "Assets",
            vec![
                RawCell::Text("2024-01-05".to_string()),
                RawCell::Text("Kas".to_string()),
                RawCell::Empty,
                RawCell::Number(10.0),
            ],
        )
        .expect("row appended");

    let restored = excel_read::read_sheets(&path).expect("workbook read");
    assert_eq!(restored.len(), 3);
    assert_eq!(restored[1], sheets[1]);
    assert_eq!(restored[2], notes);

    let liabilities = store.fetch_all("Liabilities").expect("rows fetched");
    assert_eq!(liabilities.len(), 1);
    let state = DashboardState::load(&store).expect("dashboard loaded");
    assert_eq!(state.liabilities.records[0].date, Some(ymd(2024, 1, 2)));
    assert_eq!(state.assets.records[0].description, "");
}

#[test]
fn append_keeps_times_booleans_and_durations_in_other_sheets() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");

    let mut workbook = Workbook::new();
    for name in ["Assets", "Liabilities"] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).expect("sheet named");
        for (col, header) in ["date", "category", "description", "amount"].iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .expect("header written");
        }
    }
    let notes = workbook.add_worksheet();
    notes.set_name("Catatan").expect("sheet named");
    notes
        .write_number_with_format(0, 0, 0.5208333333333334, &Format::new().set_num_format("hh:mm"))
        .expect("time written");
    notes.write_boolean(0, 1, true).expect("boolean written");
    notes
        .write_number_with_format(0, 2, 45292.75, &Format::new().set_num_format("yyyy-mm-dd hh:mm"))
        .expect("date-time written");
    notes
        .write_number_with_format(0, 3, 1.5, &Format::new().set_num_format("[h]:mm:ss"))
        .expect("duration written");
    workbook.save(&path).expect("workbook saved");

    let expected = vec![
        RawCell::DateTime(0.5208333333333334),
        RawCell::Bool(true),
        RawCell::DateTime(45292.75),
        RawCell::Duration(1.5),
    ];
    let before = excel_read::read_sheet(&path, "Catatan").expect("notes read");
    assert_eq!(before.rows, vec![expected.clone()]);

    let mut store = WorkbookStore::open(&path).expect("store opened");
    let record = NewRecord::new(TableKind::Assets, ymd(2024, 1, 1), "Kas", "", 10.0)
        .expect("valid record");
    store
        .append_row("Assets", record.to_row())
        .expect("row appended");

    let after = excel_read::read_sheet(&path, "Catatan").expect("notes read");
    assert_eq!(after.rows, vec![expected]);
    assert_eq!(store.fetch_all("Assets").expect("rows fetched").len(), 1);
}

#[test]
fn append_to_unknown_sheet_fails() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");
    let mut store = WorkbookStore::create(&path).expect("store created");

    let result = store.append_row("Expenses", vec![RawCell::Number(1.0)]);
    assert!(matches!(result, Err(DashboardError::MissingSheet(_))));
}

#[test]
fn rendered_dashboard_contains_all_views() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");
    let mut store = WorkbookStore::create(&path).expect("store created");
    for (kind, day, amount) in [
        (TableKind::Assets, 1, 100.0),
        (TableKind::Liabilities, 2, 30.0),
        (TableKind::Assets, 3, 50.0),
    ] {
        let record = NewRecord::new(kind, ymd(2024, 1, day), "Umum", "", amount)
            .expect("valid record");
        submit(&mut store, &record).expect("record submitted");
    }

    let state = DashboardState::load(&store).expect("dashboard loaded");
    let output = temp_dir.path().join("dashboard.xlsx");
    state.render_workbook(&output).expect("dashboard written");

    let mut workbook: Xlsx<_> = open_workbook(&output).expect("dashboard opened");
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["Dashboard", "Tren", "Aset", "Liabilitas"]
    );

    let overview = workbook
        .worksheet_range("Dashboard")
        .expect("dashboard sheet")
        .expect("dashboard range");
    assert_eq!(
        overview.get_value((0, 0)),
        Some(&DataType::String("Dashboard Keuangan Pribadi".to_string()))
    );
    assert_eq!(overview.get_value((3, 2)), Some(&DataType::Float(120.0)));

    let trend = workbook
        .worksheet_range("Tren")
        .expect("trend sheet")
        .expect("trend range");
    assert_eq!(trend.height(), 4);
    assert_eq!(trend.get_value((1, 2)), Some(&DataType::Empty));
    assert_eq!(trend.get_value((3, 3)), Some(&DataType::Float(120.0)));
}

#[test]
fn empty_dashboard_renders_placeholders() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("finance.xlsx");
    let store = WorkbookStore::create(&path).expect("store created");

    let state = DashboardState::load(&store).expect("dashboard loaded");
    let output = temp_dir.path().join("dashboard.xlsx");
    state.render_workbook(&output).expect("dashboard written");

    let overview = excel_read::read_sheet(&output, "Dashboard").expect("dashboard read");
    assert_eq!(
        overview.rows[6][0],
        RawCell::Text(PIE_EMPTY_WARNING.to_string())
    );
    assert_eq!(
        overview.rows[6][8],
        RawCell::Text(excel_write::TREND_EMPTY_NOTE.to_string())
    );
}
