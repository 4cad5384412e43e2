//! Customer and result records.

use serde::{Deserialize, Serialize};

use crate::enums::{
    ChurnLabel, MaritalStatus, PreferedOrderCat, SatisfactionScore, parse_flag, parse_whole_number,
};
use crate::error::{ModelError, Result};
use crate::schema::{
    CASHBACK_AMOUNT, COMPLAIN, ColumnKind, DAY_SINCE_LAST_ORDER, MARITAL_STATUS,
    NUMBER_OF_ADDRESS, NUMBER_OF_DEVICE_REGISTERED, PREFERED_ORDER_CAT, SATISFACTION_SCORE,
    TENURE, WAREHOUSE_TO_HOME, column_spec,
};

/// A single scalar value of a customer field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Category(&'static str),
    Flag(bool),
}

impl FieldValue {
    /// Numeric view used for scoring; `None` for categories.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Flag(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            FieldValue::Category(_) => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Category(value) => write!(f, "{value}"),
            FieldValue::Flag(flag) => write!(f, "{}", u8::from(*flag)),
        }
    }
}

/// Customer attributes in the schema the churn model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerRecord {
    /// Months as a customer.
    pub tenure: i64,
    /// Distance from warehouse to the customer's home in km.
    pub warehouse_to_home: i64,
    pub number_of_device_registered: i64,
    pub prefered_order_cat: PreferedOrderCat,
    pub satisfaction_score: SatisfactionScore,
    pub marital_status: MaritalStatus,
    pub number_of_address: i64,
    /// Whether any complaint was raised in the last month.
    pub complain: bool,
    pub day_since_last_order: i64,
    pub cashback_amount: i64,
}

impl Default for CustomerRecord {
    fn default() -> Self {
        Self {
            tenure: 10,
            warehouse_to_home: 10,
            number_of_device_registered: 2,
            prefered_order_cat: PreferedOrderCat::default(),
            satisfaction_score: SatisfactionScore::default(),
            marital_status: MaritalStatus::default(),
            number_of_address: 2,
            complain: false,
            day_since_last_order: 30,
            cashback_amount: 100,
        }
    }
}

impl CustomerRecord {
    /// Field values in trained column order.
    pub fn fields(&self) -> [(&'static str, FieldValue); 10] {
        [
            (TENURE, FieldValue::Integer(self.tenure)),
            (WAREHOUSE_TO_HOME, FieldValue::Integer(self.warehouse_to_home)),
            (
                NUMBER_OF_DEVICE_REGISTERED,
                FieldValue::Integer(self.number_of_device_registered),
            ),
            (
                PREFERED_ORDER_CAT,
                FieldValue::Category(self.prefered_order_cat.as_str()),
            ),
            (
                SATISFACTION_SCORE,
                FieldValue::Integer(i64::from(self.satisfaction_score.value())),
            ),
            (
                MARITAL_STATUS,
                FieldValue::Category(self.marital_status.as_str()),
            ),
            (NUMBER_OF_ADDRESS, FieldValue::Integer(self.number_of_address)),
            (COMPLAIN, FieldValue::Flag(self.complain)),
            (
                DAY_SINCE_LAST_ORDER,
                FieldValue::Integer(self.day_since_last_order),
            ),
            (CASHBACK_AMOUNT, FieldValue::Integer(self.cashback_amount)),
        ]
    }

    /// Check every integer field against the form limits.
    ///
    /// Returns the first violation in trained column order.
    pub fn validate_ranges(&self) -> Result<()> {
        for (name, value) in self.fields() {
            let FieldValue::Integer(value) = value else {
                continue;
            };
            let Some(spec) = column_spec(name) else {
                continue;
            };
            if let ColumnKind::Integer { min, max } = spec.kind
                && !(min..=max).contains(&value)
            {
                return Err(ModelError::OutOfRange {
                    field: spec.name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Build a record from raw cell text looked up by column name.
    ///
    /// Missing or empty cells are reported as invalid values of that column.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&'static str) -> Option<String>,
    {
        let mut cell = |column: &'static str| lookup(column).unwrap_or_default();
        Ok(Self {
            tenure: parse_integer(TENURE, &cell(TENURE))?,
            warehouse_to_home: parse_integer(WAREHOUSE_TO_HOME, &cell(WAREHOUSE_TO_HOME))?,
            number_of_device_registered: parse_integer(
                NUMBER_OF_DEVICE_REGISTERED,
                &cell(NUMBER_OF_DEVICE_REGISTERED),
            )?,
            prefered_order_cat: cell(PREFERED_ORDER_CAT).parse()?,
            satisfaction_score: cell(SATISFACTION_SCORE).parse()?,
            marital_status: cell(MARITAL_STATUS).parse()?,
            number_of_address: parse_integer(NUMBER_OF_ADDRESS, &cell(NUMBER_OF_ADDRESS))?,
            complain: parse_flag(COMPLAIN, &cell(COMPLAIN))?,
            day_since_last_order: parse_integer(
                DAY_SINCE_LAST_ORDER,
                &cell(DAY_SINCE_LAST_ORDER),
            )?,
            cashback_amount: parse_integer(CASHBACK_AMOUNT, &cell(CASHBACK_AMOUNT))?,
        })
    }
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64> {
    parse_whole_number(raw).ok_or_else(|| ModelError::InvalidValue {
        field,
        value: raw.to_string(),
        expected: "a whole number",
    })
}

/// A customer record decorated with the model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub customer: CustomerRecord,
    pub label: ChurnLabel,
    /// Churn probability in `[0, 1]`.
    pub probability: f64,
}

impl ResultRecord {
    pub fn new(customer: CustomerRecord, label: ChurnLabel, probability: f64) -> Self {
        Self {
            customer,
            label,
            probability,
        }
    }

    /// Probability rounded to two decimals as shown and exported.
    pub fn rounded_probability(&self) -> f64 {
        round_probability(self.probability)
    }
}

/// Round a probability to two decimals.
pub fn round_probability(probability: f64) -> f64 {
    (probability * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_initial_values() {
        let record = CustomerRecord::default();
        assert_eq!(record.tenure, 10);
        assert_eq!(record.prefered_order_cat, PreferedOrderCat::MobilePhone);
        assert_eq!(record.satisfaction_score.value(), 1);
        assert_eq!(record.day_since_last_order, 30);
        assert!(record.validate_ranges().is_ok());
    }

    #[test]
    fn validate_ranges_reports_first_violation() {
        let record = CustomerRecord {
            number_of_device_registered: 0,
            cashback_amount: 5000,
            ..CustomerRecord::default()
        };
        let err = record.validate_ranges().unwrap_err();
        assert_eq!(
            err,
            ModelError::OutOfRange {
                field: NUMBER_OF_DEVICE_REGISTERED,
                value: 0,
                min: 1,
                max: 10,
            }
        );
    }

    #[test]
    fn from_lookup_rejects_empty_cells() {
        let err = CustomerRecord::from_lookup(|column| {
            (column != TENURE).then(|| "1".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidValue { field: TENURE, .. }));
    }

    #[test]
    fn serializes_with_trained_column_names() {
        let json = serde_json::to_value(CustomerRecord::default()).expect("serialize");
        assert_eq!(json["PreferedOrderCat"], "Mobile Phone");
        assert_eq!(json["NumberOfDeviceRegistered"], 2);
        assert_eq!(json["SatisfactionScore"], 1);
    }

    #[test]
    fn probability_rounding() {
        assert_eq!(round_probability(0.456), 0.46);
        assert_eq!(round_probability(0.0), 0.0);
        assert_eq!(round_probability(1.0), 1.0);
    }
}
