//! Trained column schema.
//!
//! Column names and their order match the churn model's training data.
//! Labels are the captions shown next to each manual input field.

use serde::Serialize;

use crate::enums::{MaritalStatus, PreferedOrderCat};

pub const TENURE: &str = "Tenure";
pub const WAREHOUSE_TO_HOME: &str = "WarehouseToHome";
pub const NUMBER_OF_DEVICE_REGISTERED: &str = "NumberOfDeviceRegistered";
pub const PREFERED_ORDER_CAT: &str = "PreferedOrderCat";
pub const SATISFACTION_SCORE: &str = "SatisfactionScore";
pub const MARITAL_STATUS: &str = "MaritalStatus";
pub const NUMBER_OF_ADDRESS: &str = "NumberOfAddress";
pub const COMPLAIN: &str = "Complain";
pub const DAY_SINCE_LAST_ORDER: &str = "DaySinceLastOrder";
pub const CASHBACK_AMOUNT: &str = "CashbackAmount";

/// Derived column holding the 0/1 churn prediction.
pub const PREDICTION_COLUMN: &str = "Prediksi Churn";
/// Derived column holding the churn probability rounded to two decimals.
pub const PROBABILITY_COLUMN: &str = "Probabilitas Churn";

/// Customer columns in trained order.
pub const CUSTOMER_COLUMNS: [&str; 10] = [
    TENURE,
    WAREHOUSE_TO_HOME,
    NUMBER_OF_DEVICE_REGISTERED,
    PREFERED_ORDER_CAT,
    SATISFACTION_SCORE,
    MARITAL_STATUS,
    NUMBER_OF_ADDRESS,
    COMPLAIN,
    DAY_SINCE_LAST_ORDER,
    CASHBACK_AMOUNT,
];

/// Value domain of a customer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Whole number limited to `min..=max`.
    Integer { min: i64, max: i64 },
    /// One of a fixed set of category strings.
    Category { values: &'static [&'static str] },
    /// 0/1 flag.
    Flag,
}

impl ColumnKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Integer { .. } => "integer",
            ColumnKind::Category { .. } => "category",
            ColumnKind::Flag => "flag",
        }
    }

    /// Human-readable domain, e.g. `0-100` or `Single | Married`.
    pub fn domain(&self) -> String {
        match self {
            ColumnKind::Integer { min, max } => format!("{min}-{max}"),
            ColumnKind::Category { values } => values.join(" | "),
            ColumnKind::Flag => "0 | 1".to_string(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnKind::Category { .. })
    }
}

/// Metadata for one customer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

const ORDER_CATEGORIES: [&str; 6] = [
    PreferedOrderCat::MobilePhone.as_str(),
    PreferedOrderCat::LaptopAccessory.as_str(),
    PreferedOrderCat::Grocery.as_str(),
    PreferedOrderCat::Mobile.as_str(),
    PreferedOrderCat::Others.as_str(),
    PreferedOrderCat::Fashion.as_str(),
];

const MARITAL_STATUSES: [&str; 3] = [
    MaritalStatus::Single.as_str(),
    MaritalStatus::Married.as_str(),
    MaritalStatus::Divorced.as_str(),
];

static COLUMN_SPECS: [ColumnSpec; 10] = [
    ColumnSpec {
        name: TENURE,
        label: "Tenure (bulan)",
        kind: ColumnKind::Integer { min: 0, max: 100 },
    },
    ColumnSpec {
        name: WAREHOUSE_TO_HOME,
        label: "Warehouse to Home (km)",
        kind: ColumnKind::Integer { min: 0, max: 100 },
    },
    ColumnSpec {
        name: NUMBER_OF_DEVICE_REGISTERED,
        label: "Jumlah Perangkat Terdaftar",
        kind: ColumnKind::Integer { min: 1, max: 10 },
    },
    ColumnSpec {
        name: PREFERED_ORDER_CAT,
        label: "Kategori Pesanan Favorit",
        kind: ColumnKind::Category {
            values: &ORDER_CATEGORIES,
        },
    },
    ColumnSpec {
        name: SATISFACTION_SCORE,
        label: "Skor Kepuasan (1-5)",
        kind: ColumnKind::Integer { min: 1, max: 5 },
    },
    ColumnSpec {
        name: MARITAL_STATUS,
        label: "Status Pernikahan",
        kind: ColumnKind::Category {
            values: &MARITAL_STATUSES,
        },
    },
    ColumnSpec {
        name: NUMBER_OF_ADDRESS,
        label: "Jumlah Alamat",
        kind: ColumnKind::Integer { min: 1, max: 10 },
    },
    ColumnSpec {
        name: COMPLAIN,
        label: "Pernah Komplain?",
        kind: ColumnKind::Flag,
    },
    ColumnSpec {
        name: DAY_SINCE_LAST_ORDER,
        label: "Hari Sejak Transaksi Terakhir",
        kind: ColumnKind::Integer { min: 0, max: 365 },
    },
    ColumnSpec {
        name: CASHBACK_AMOUNT,
        label: "Jumlah Cashback",
        kind: ColumnKind::Integer { min: 0, max: 1000 },
    },
];

/// Column metadata in trained order.
pub fn column_specs() -> &'static [ColumnSpec] {
    &COLUMN_SPECS
}

/// Look up a column by exact name.
pub fn column_spec(name: &str) -> Option<&'static ColumnSpec> {
    COLUMN_SPECS.iter().find(|spec| spec.name == name)
}

/// Returns the trained columns absent from `present`, in trained order.
pub fn missing_columns<S: AsRef<str>>(present: &[S]) -> Vec<String> {
    CUSTOMER_COLUMNS
        .iter()
        .filter(|column| !present.iter().any(|name| name.as_ref() == **column))
        .map(|column| (*column).to_string())
        .collect()
}
