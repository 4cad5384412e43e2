//! Tests for churn-model types.

use std::collections::BTreeMap;

use churn_model::{
    CUSTOMER_COLUMNS, ChurnLabel, CustomerRecord, MaritalStatus, ModelError, PreferedOrderCat,
    ResultRecord, SatisfactionScore,
};

fn scenario_a() -> CustomerRecord {
    CustomerRecord {
        tenure: 10,
        warehouse_to_home: 10,
        number_of_device_registered: 2,
        prefered_order_cat: PreferedOrderCat::MobilePhone,
        satisfaction_score: SatisfactionScore::new(3).unwrap(),
        marital_status: MaritalStatus::Single,
        number_of_address: 2,
        complain: false,
        day_since_last_order: 30,
        cashback_amount: 100,
    }
}

#[test]
fn fields_follow_trained_column_order() {
    let record = scenario_a();
    let names: Vec<&str> = record.fields().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, CUSTOMER_COLUMNS);
}

#[test]
fn from_lookup_parses_spreadsheet_cells() {
    let cells: BTreeMap<&str, &str> = [
        ("Tenure", "10"),
        ("WarehouseToHome", "10.0"),
        ("NumberOfDeviceRegistered", "2"),
        ("PreferedOrderCat", "Mobile Phone"),
        ("SatisfactionScore", "3"),
        ("MaritalStatus", "Single"),
        ("NumberOfAddress", "2"),
        ("Complain", "0"),
        ("DaySinceLastOrder", "30"),
        ("CashbackAmount", "100"),
    ]
    .into_iter()
    .collect();

    let record = CustomerRecord::from_lookup(|column| cells.get(column).map(|v| v.to_string()))
        .expect("parse record");

    assert_eq!(record, scenario_a());
}

#[test]
fn from_lookup_reports_unknown_category() {
    let err = CustomerRecord::from_lookup(|column| {
        let value = match column {
            "PreferedOrderCat" => "Books",
            "MaritalStatus" => "Single",
            _ => "1",
        };
        Some(value.to_string())
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ModelError::InvalidCategory {
            field: "PreferedOrderCat",
            ..
        }
    ));
}

#[test]
fn out_of_range_message_names_the_limits() {
    let err = CustomerRecord {
        tenure: 250,
        ..scenario_a()
    }
    .validate_ranges()
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tenure must be between 0 and 100 (got 250)"
    );
}

#[test]
fn result_record_serializes() {
    let result = ResultRecord::new(scenario_a(), ChurnLabel::Churn, 0.734);
    let json = serde_json::to_string(&result).expect("serialize result");
    let round: ResultRecord = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round.label, ChurnLabel::Churn);
    assert_eq!(round.rounded_probability(), 0.73);
    assert_eq!(round.customer, scenario_a());
}
