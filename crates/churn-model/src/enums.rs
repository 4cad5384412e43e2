//! Categorical customer attributes.
//!
//! The category strings are the exact values the churn model was trained on,
//! so `as_str` output doubles as the wire/column representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Preferred order category of the customer during the last month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreferedOrderCat {
    #[default]
    #[serde(rename = "Mobile Phone")]
    MobilePhone,
    #[serde(rename = "Laptop & Accessory")]
    LaptopAccessory,
    Grocery,
    Mobile,
    Others,
    Fashion,
}

impl PreferedOrderCat {
    /// All categories in form order.
    pub const ALL: [PreferedOrderCat; 6] = [
        PreferedOrderCat::MobilePhone,
        PreferedOrderCat::LaptopAccessory,
        PreferedOrderCat::Grocery,
        PreferedOrderCat::Mobile,
        PreferedOrderCat::Others,
        PreferedOrderCat::Fashion,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PreferedOrderCat::MobilePhone => "Mobile Phone",
            PreferedOrderCat::LaptopAccessory => "Laptop & Accessory",
            PreferedOrderCat::Grocery => "Grocery",
            PreferedOrderCat::Mobile => "Mobile",
            PreferedOrderCat::Others => "Others",
            PreferedOrderCat::Fashion => "Fashion",
        }
    }
}

impl fmt::Display for PreferedOrderCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PreferedOrderCat {
    type Err = ModelError;

    /// Matches category names exactly after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == trimmed)
            .ok_or_else(|| ModelError::InvalidCategory {
                field: "PreferedOrderCat",
                value: s.to_string(),
                allowed: join_labels(Self::ALL.iter().map(PreferedOrderCat::as_str)),
            })
    }
}

/// Marital status of the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 3] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| ModelError::InvalidCategory {
                field: "MaritalStatus",
                value: s.to_string(),
                allowed: join_labels(Self::ALL.iter().map(MaritalStatus::as_str)),
            })
    }
}

/// Satisfaction score on a 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SatisfactionScore(u8);

impl SatisfactionScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a score, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::OutOfRange {
                field: "SatisfactionScore",
                value: i64::from(value),
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for SatisfactionScore {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for SatisfactionScore {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SatisfactionScore> for u8 {
    fn from(score: SatisfactionScore) -> Self {
        score.0
    }
}

impl fmt::Display for SatisfactionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SatisfactionScore {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_whole_number(s).ok_or_else(|| ModelError::InvalidValue {
            field: "SatisfactionScore",
            value: s.to_string(),
            expected: "an integer between 1 and 5",
        })?;
        let value = u8::try_from(value).map_err(|_| ModelError::OutOfRange {
            field: "SatisfactionScore",
            value,
            min: i64::from(Self::MIN),
            max: i64::from(Self::MAX),
        })?;
        Self::new(value)
    }
}

/// Predicted churn outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChurnLabel {
    /// Customer is expected to keep transacting.
    Retained,
    /// Customer is expected to stop transacting.
    Churn,
}

impl ChurnLabel {
    pub fn from_flag(churn: bool) -> Self {
        if churn {
            ChurnLabel::Churn
        } else {
            ChurnLabel::Retained
        }
    }

    pub fn is_churn(self) -> bool {
        matches!(self, ChurnLabel::Churn)
    }

    /// The 0/1 encoding used in exported tables.
    pub fn as_flag(self) -> u8 {
        u8::from(self.is_churn())
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_flag())
    }
}

/// Parse a 0/1 complaint flag. Also accepts `true`/`false`.
pub fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ModelError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        _ => Err(ModelError::InvalidValue {
            field,
            value: raw.to_string(),
            expected: "0 or 1",
        }),
    }
}

/// Parse an integer, accepting whole floats such as `10.0` from spreadsheets.
pub fn parse_whole_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    whole_f64_to_i64(value)
}

/// Exact conversion of a whole float; `None` for fractions, non-finite values
/// and anything outside the `i64` range.
fn whole_f64_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_category_round_trips_through_str() {
        for category in PreferedOrderCat::ALL {
            assert_eq!(category.as_str().parse::<PreferedOrderCat>(), Ok(category));
        }
        assert_eq!(
            " Laptop & Accessory ".parse::<PreferedOrderCat>(),
            Ok(PreferedOrderCat::LaptopAccessory)
        );
    }

    #[test]
    fn unknown_category_lists_allowed_values() {
        let err = "Books".parse::<PreferedOrderCat>().unwrap_err();
        assert!(err.to_string().contains("Mobile Phone, Laptop & Accessory"));
    }

    #[test]
    fn marital_status_is_case_sensitive() {
        assert_eq!("Married".parse::<MaritalStatus>(), Ok(MaritalStatus::Married));
        assert!("married".parse::<MaritalStatus>().is_err());
    }

    #[test]
    fn satisfaction_score_bounds() {
        assert!(SatisfactionScore::new(0).is_err());
        assert!(SatisfactionScore::new(6).is_err());
        assert_eq!("3".parse::<SatisfactionScore>().map(SatisfactionScore::value), Ok(3));
        assert_eq!("4.0".parse::<SatisfactionScore>().map(SatisfactionScore::value), Ok(4));
        assert!("300".parse::<SatisfactionScore>().is_err());
    }

    #[test]
    fn flags_and_whole_numbers() {
        assert_eq!(parse_flag("Complain", "1"), Ok(true));
        assert_eq!(parse_flag("Complain", "FALSE"), Ok(false));
        assert!(parse_flag("Complain", "2").is_err());
        assert_eq!(parse_whole_number("12"), Some(12));
        assert_eq!(parse_whole_number("12.0"), Some(12));
        assert_eq!(parse_whole_number("12.5"), None);
        assert_eq!(parse_whole_number(""), None);
        assert_eq!(parse_whole_number("1e300"), None);
        assert_eq!(parse_whole_number("-1e19"), None);
        assert_eq!(whole_f64_to_i64(-9_223_372_036_854_775_808.0), Some(i64::MIN));
    }

    #[test]
    fn churn_label_flag() {
        assert_eq!(ChurnLabel::from_flag(true).as_flag(), 1);
        assert_eq!(ChurnLabel::Retained.to_string(), "0");
    }
}
