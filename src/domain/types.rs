use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::PredictionError;

// ============================================================================
// Input
// ============================================================================

/// Number of billable calls, the single feature behind every estimate.
///
/// Always `>= 1`; construct through [`BillableCallCount::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BillableCallCount(u64);

impl BillableCallCount {
    pub const MIN: u64 = 1;

    pub fn new(calls: i64) -> Result<Self, PredictionError> {
        if calls < Self::MIN as i64 {
            return Err(PredictionError::invalid(format!(
                "billable calls must be >= {}, got {calls}",
                Self::MIN
            )));
        }
        Ok(Self(calls as u64))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn as_feature(&self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for BillableCallCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for BillableCallCount {
    type Error = PredictionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Quantity an estimator predicts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Target {
    Revenue,
    Spend,
    Profit,
}

impl Target {
    /// Human readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Spend => "Spend",
            Self::Profit => "Profit",
        }
    }
}

// ============================================================================
// Money
// ============================================================================

/// Dollar amount formatted with thousands separators, e.g. `$1,234.56`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub f64);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write!(f, "${}", self.0);
        }
        let cents = (self.0.abs() * 100.0).round();
        let whole = (cents / 100.0).trunc() as u128;
        let frac = (cents % 100.0) as u8;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0.0 && cents > 0.0 { "-" } else { "" };
        write!(f, "{sign}${grouped}.{frac:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_call_count_boundary() {
        assert!(BillableCallCount::new(0).is_err());
        assert!(BillableCallCount::new(-1).is_err());
        assert_eq!(BillableCallCount::new(1).unwrap().get(), 1);
        assert_eq!(BillableCallCount::try_from(10).unwrap().as_feature(), 10.0);
    }

    #[test]
    fn test_call_count_rejection_is_invalid_input() {
        let err = BillableCallCount::new(-5).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidInput(_)));
    }

    #[test]
    fn test_target_round_trip_names() {
        assert_eq!(Target::Revenue.to_string(), "revenue");
        assert_eq!(Target::from_str("Spend").unwrap(), Target::Spend);
        assert!(Target::from_str("margin").is_err());

        let all: Vec<Target> = Target::iter().collect();
        assert_eq!(all, vec![Target::Revenue, Target::Spend, Target::Profit]);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money(0.0).to_string(), "$0.00");
        assert_eq!(Money(1000.0).to_string(), "$1,000.00");
        assert_eq!(Money(1234567.891).to_string(), "$1,234,567.89");
        assert_eq!(Money(999.999).to_string(), "$1,000.00");
        assert_eq!(Money(-42.5).to_string(), "-$42.50");
    }

    #[test]
    fn test_money_display_keeps_non_finite_visible() {
        assert_eq!(Money(f64::NAN).to_string(), "$NaN");
        assert_eq!(Money(f64::INFINITY).to_string(), "$inf");
    }
}
