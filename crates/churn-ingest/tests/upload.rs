//! Integration tests for reading customer uploads.

use std::fs;

use churn_ingest::{
    IngestError, UploadFormat, column_names, extract_records, read_upload, read_upload_bytes,
};
use churn_model::{CustomerRecord, MaritalStatus, ModelError, PreferedOrderCat, SatisfactionScore};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

const HEADER: &str = "Tenure,WarehouseToHome,NumberOfDeviceRegistered,PreferedOrderCat,SatisfactionScore,MaritalStatus,NumberOfAddress,Complain,DaySinceLastOrder,CashbackAmount";

fn scenario_a() -> CustomerRecord {
    CustomerRecord {
        satisfaction_score: SatisfactionScore::new(3).unwrap(),
        ..CustomerRecord::default()
    }
}

#[test]
fn csv_row_matches_manual_record() {
    let contents = format!("{HEADER}\n10,10,2,Mobile Phone,3,Single,2,0,30,100\n");
    let upload = read_upload_bytes("pelanggan.csv", contents.as_bytes()).expect("read csv");
    assert_eq!(upload.format, UploadFormat::Csv);
    assert_eq!(upload.row_count(), 1);

    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records, vec![scenario_a()]);
}

#[test]
fn reads_upload_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("Batch.CSV");
    let contents = format!(
        "{HEADER}\n10,10,2,Mobile Phone,3,Single,2,0,30,100\n3,25,4,Laptop & Accessory,5,Married,3,1,2,180\n"
    );
    fs::write(&path, contents).expect("write csv");

    let upload = read_upload(&path).expect("read upload");
    assert_eq!(upload.file_name, "Batch.CSV");
    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[1].prefered_order_cat,
        PreferedOrderCat::LaptopAccessory
    );
    assert_eq!(records[1].marital_status, MaritalStatus::Married);
    assert!(records[1].complain);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_upload(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_upload(&dir.path().join("absent.xls")).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_column_is_a_schema_mismatch() {
    let contents = "Tenure,WarehouseToHome,NumberOfDeviceRegistered,PreferedOrderCat,SatisfactionScore,MaritalStatus,NumberOfAddress,DaySinceLastOrder,CashbackAmount\n10,10,2,Mobile Phone,3,Single,2,30,100\n";
    let upload = read_upload_bytes("partial.csv", contents.as_bytes()).expect("read csv");
    let err = extract_records(&upload.data).unwrap_err();
    match err {
        IngestError::SchemaMismatch { missing } => assert_eq!(missing, vec!["Complain"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extra_columns_are_kept_but_ignored() {
    let contents = format!("CustomerID,{HEADER}\n50001,10,10,2,Mobile Phone,3,Single,2,0,30,100\n");
    let upload = read_upload_bytes("extra.csv", contents.as_bytes()).expect("read csv");
    assert_eq!(column_names(&upload.data)[0], "CustomerID");
    assert_eq!(upload.data.width(), 11);
    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records, vec![scenario_a()]);
}

#[test]
fn invalid_cell_reports_data_row() {
    let contents = format!(
        "{HEADER}\n10,10,2,Mobile Phone,3,Single,2,0,30,100\n10,10,2,Mobile Phone,3,Widowed,2,0,30,100\n"
    );
    let upload = read_upload_bytes("bad.csv", contents.as_bytes()).expect("read csv");
    let err = extract_records(&upload.data).unwrap_err();
    match err {
        IngestError::InvalidRow { row, source } => {
            assert_eq!(row, 2);
            assert!(matches!(
                source,
                ModelError::InvalidCategory {
                    field: "MaritalStatus",
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn scenario_a_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in HEADER.split(',').enumerate() {
        sheet.write_string(0, col as u16, name).expect("header");
    }
    let numbers = [10.0, 10.0, 2.0];
    for (col, value) in numbers.iter().enumerate() {
        sheet.write_number(1, col as u16, *value).expect("number");
    }
    sheet.write_string(1, 3, "Mobile Phone").expect("category");
    sheet.write_number(1, 4, 3.0).expect("score");
    sheet.write_string(1, 5, "Single").expect("status");
    let tail = [2.0, 0.0, 30.0, 100.0];
    for (offset, value) in tail.iter().enumerate() {
        sheet
            .write_number(1, 6 + offset as u16, *value)
            .expect("number");
    }
    workbook
}

#[test]
fn xlsx_upload_reads_first_sheet() {
    let bytes = scenario_a_workbook()
        .save_to_buffer()
        .expect("save workbook");

    let upload = read_upload_bytes("pelanggan.xlsx", &bytes).expect("read xlsx");
    assert_eq!(upload.format, UploadFormat::Xlsx);
    assert_eq!(upload.row_count(), 1);
    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records, vec![scenario_a()]);
}

#[test]
fn xlsx_cells_past_the_header_are_ignored() {
    let mut workbook = scenario_a_workbook();
    let sheet = workbook.worksheet_from_index(0).expect("sheet");
    sheet.write_string(1, 11, "note").expect("stray cell");
    sheet.write_string(3, 12, "another note").expect("stray row");
    let bytes = workbook.save_to_buffer().expect("save workbook");

    let upload = read_upload_bytes("pelanggan.xlsx", &bytes).expect("read xlsx");
    assert_eq!(column_names(&upload.data), HEADER.split(',').collect::<Vec<_>>());
    assert_eq!(upload.row_count(), 1);
    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records, vec![scenario_a()]);
}

#[test]
fn late_text_in_extra_csv_column_is_kept() {
    let mut contents = format!("{HEADER},Notes\n");
    for row in 0..150 {
        let note = if row == 140 {
            "call back".to_string()
        } else {
            row.to_string()
        };
        contents.push_str(&format!("10,10,2,Mobile Phone,3,Single,2,0,30,100,{note}\n"));
    }
    let upload = read_upload_bytes("pelanggan.csv", contents.as_bytes()).expect("read csv");
    assert_eq!(upload.row_count(), 150);

    let records = extract_records(&upload.data).expect("extract");
    assert_eq!(records.len(), 150);
    assert!(records.iter().all(|record| *record == scenario_a()));
}
