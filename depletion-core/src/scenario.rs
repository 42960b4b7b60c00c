//! Scenario parsing and the time-to-exhaustion arithmetic
//!
//! A scenario line is `<storage> <rate1> ... <rateN>`. Each rate is the time a
//! single source takes to consume one unit of storage, so sources working in
//! parallel combine as the sum of reciprocals. The ETA is the ceiling of
//! `storage / combined_rate`.

use std::fmt;
use std::str::FromStr;

use crate::error::{DepletionError, Result, ZeroDivisor};

/// 2^63, the first value past `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Whole time units until a storage is exhausted
///
/// Holds the ceiled quotient as an integral `f64`, so every finite result is
/// representable however large it gets. `Display` prints all of its digits,
/// with no exponent and no fractional part.
///
/// Signed because rates may be negative (production); for the usual
/// positive inputs the value is never below zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Eta(f64);

impl Eta {
    /// Ceil a finite quotient; `None` for NaN and infinities
    pub fn from_quotient(quotient: f64) -> Option<Self> {
        if !quotient.is_finite() {
            return None;
        }
        // ceil(-0.5) is -0.0, which would print as "-0"
        Some(Self(quotient.ceil() + 0.0))
    }

    /// The value as an integral float
    pub fn value(self) -> f64 {
        self.0
    }

    /// The value as an `i64`, if it fits
    pub fn to_i64(self) -> Option<i64> {
        (-I64_BOUND..I64_BOUND)
            .contains(&self.0)
            .then_some(self.0 as i64)
    }
}

impl From<i64> for Eta {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

// Integers where they fit so JSON shows `1000`, not `1000.0`
#[cfg(feature = "serde")]
impl serde::Serialize for Eta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(value) = self.to_i64() {
            serializer.serialize_i64(value)
        } else if (0.0..2.0 * I64_BOUND).contains(&self.0) {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Eta {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        if value.is_finite() && value.fract() == 0.0 {
            Ok(Self(value + 0.0))
        } else {
            Err(serde::de::Error::custom(format!(
                "ETA must be a whole number, got {value}"
            )))
        }
    }
}

/// One parsed scenario line
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Initial capacity
    pub storage: f64,
    /// Independent depletion rates, in input order
    pub rates: Vec<f64>,
}

impl Scenario {
    /// Build a scenario from already-parsed values
    pub fn new(storage: f64, rates: impl Into<Vec<f64>>) -> Self {
        Self {
            storage,
            rates: rates.into(),
        }
    }

    /// Parse a whitespace-separated line
    ///
    /// The first token is the storage, the rest are rates. Every token must
    /// parse as `f64`; the first one that does not is reported with its
    /// 1-based column.
    pub fn parse(line: &str) -> Result<Self> {
        let mut values = line
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token
                    .parse::<f64>()
                    .map_err(|source| DepletionError::InvalidNumber {
                        column: i + 1,
                        token: token.to_string(),
                        source,
                    })
            });

        let storage = match values.next() {
            Some(value) => value?,
            None => return Err(DepletionError::MissingStorage),
        };
        let rates = values.collect::<Result<Vec<_>>>()?;

        Ok(Self { storage, rates })
    }

    /// Sum of the reciprocals of all rates
    pub fn combined_rate(&self) -> Result<f64> {
        if self.rates.is_empty() {
            return Err(DepletionError::DivisionByZero(ZeroDivisor::NoRates));
        }

        let mut combined = 0.0;
        for (i, rate) in self.rates.iter().enumerate() {
            // -0.0 == 0.0
            if *rate == 0.0 {
                return Err(DepletionError::DivisionByZero(ZeroDivisor::ZeroRate {
                    index: i + 1,
                }));
            }
            combined += 1.0 / rate;
        }

        if combined == 0.0 {
            return Err(DepletionError::DivisionByZero(ZeroDivisor::RatesCancel));
        }

        Ok(combined)
    }

    /// `ceil(storage / combined_rate)`
    pub fn eta(&self) -> Result<Eta> {
        let combined_rate = self.combined_rate()?;
        let quotient = self.storage / combined_rate;

        Eta::from_quotient(quotient).ok_or(DepletionError::NonFinite {
            storage: self.storage,
            combined_rate,
        })
    }
}

impl FromStr for Scenario {
    type Err = DepletionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage)?;
        for rate in &self.rates {
            write!(f, " {rate}")?;
        }
        Ok(())
    }
}

/// Parse a line and compute its ETA in one step
pub fn eta_for_line(line: &str) -> Result<Eta> {
    Scenario::parse(line)?.eta()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_documented_scenarios() {
        assert_eq!(eta_for_line("100 10").unwrap(), Eta::from(1000));
        assert_eq!(eta_for_line("100 10 10").unwrap(), Eta::from(500));
        assert_eq!(eta_for_line("10 3").unwrap(), Eta::from(30));
        assert_eq!(eta_for_line("1 1 1 1").unwrap(), Eta::from(1));
    }

    #[test]
    fn test_no_rates_is_division_by_zero() {
        let err = eta_for_line("50").unwrap_err();
        assert!(matches!(
            err,
            DepletionError::DivisionByZero(ZeroDivisor::NoRates)
        ));
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn test_zero_rate_reports_position() {
        let err = eta_for_line("50 4 0 2").unwrap_err();
        assert!(matches!(
            err,
            DepletionError::DivisionByZero(ZeroDivisor::ZeroRate { index: 2 })
        ));

        let err = eta_for_line("50 -0").unwrap_err();
        assert!(matches!(
            err,
            DepletionError::DivisionByZero(ZeroDivisor::ZeroRate { index: 1 })
        ));
    }

    #[test]
    fn test_cancelling_rates() {
        let err = eta_for_line("10 2 -2").unwrap_err();
        assert!(matches!(
            err,
            DepletionError::DivisionByZero(ZeroDivisor::RatesCancel)
        ));
    }

    #[test]
    fn test_parse_errors_carry_column_and_token() {
        let err = Scenario::parse("100 10 ten").unwrap_err();
        match err {
            DepletionError::InvalidNumber { column, token, .. } => {
                assert_eq!(column, 3);
                assert_eq!(token, "ten");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Scenario::parse("x 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_blank_lines_have_no_storage() {
        assert!(matches!(
            Scenario::parse("").unwrap_err(),
            DepletionError::MissingStorage
        ));
        assert!(matches!(
            Scenario::parse("   \t ").unwrap_err(),
            DepletionError::MissingStorage
        ));
    }

    #[test]
    fn test_tolerates_line_terminators_and_extra_spaces() {
        assert_eq!(eta_for_line("100 10\n").unwrap(), Eta::from(1000));
        assert_eq!(eta_for_line("100 10\r\n").unwrap(), Eta::from(1000));
        assert_eq!(eta_for_line("  100   10  10 ").unwrap(), Eta::from(500));
    }

    #[test]
    fn test_fractional_results_round_up() {
        // 7 / (1/2 + 1/3) = 8.4
        assert_eq!(eta_for_line("7 2 3").unwrap(), Eta::from(9));
        assert_eq!(eta_for_line("0.5 1").unwrap(), Eta::from(1));
        assert_eq!(eta_for_line("2.5e1 5").unwrap(), Eta::from(125));
    }

    #[test]
    fn test_zero_storage() {
        assert_eq!(eta_for_line("0 5").unwrap(), Eta::from(0));
    }

    #[test]
    fn test_negative_values_pass_through() {
        // -10 / (1/4) = -40
        assert_eq!(eta_for_line("-10 4").unwrap(), Eta::from(-40));
        // 10 / (1/2 - 1/4) = 40
        assert_eq!(eta_for_line("10 2 -4").unwrap(), Eta::from(40));
        // ceil(-0.5) is -0.0
        assert_eq!(eta_for_line("-0.5 1").unwrap(), Eta::from(0));
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            eta_for_line("inf 1").unwrap_err(),
            DepletionError::NonFinite { .. }
        ));
        assert!(matches!(
            eta_for_line("NaN 1").unwrap_err(),
            DepletionError::NonFinite { .. }
        ));
        // 1/inf == 0 → combined rate 0
        assert!(matches!(
            eta_for_line("1 inf").unwrap_err(),
            DepletionError::DivisionByZero(ZeroDivisor::RatesCancel)
        ));
    }

    #[test]
    fn test_large_quotients_print_every_digit() {
        let eta = eta_for_line("1e19 1").unwrap();
        assert_eq!(eta.to_string(), "10000000000000000000");
        assert_eq!(eta.to_i64(), None);

        // 2^63 - 1024, the largest f64 below 2^63
        let eta = eta_for_line("9223372036854774784 1").unwrap();
        assert_eq!(eta.to_string(), "9223372036854774784");
        assert_eq!(eta.to_i64(), Some(9_223_372_036_854_774_784));

        let eta = eta_for_line("9223372036854775808 1").unwrap();
        assert_eq!(eta.to_string(), "9223372036854775808");
        assert_eq!(eta.to_i64(), None);

        let digits = eta_for_line("1e300 1").unwrap().to_string();
        assert_eq!(digits.len(), 301);
        assert!(digits.starts_with("100000000000000005250476"));
        assert_eq!(eta_for_line("-1e19 1").unwrap().to_string(), "-10000000000000000000");
    }

    #[test]
    fn test_from_str_and_display() {
        let scenario: Scenario = "100 10 20".parse().unwrap();
        assert_eq!(scenario, Scenario::new(100.0, vec![10.0, 20.0]));
        assert_eq!(scenario.to_string(), "100 10 20");
        assert_eq!(Eta::from(42).to_string(), "42");
        assert_eq!(Eta::from(7).to_i64(), Some(7));
        assert_eq!(Eta::from_quotient(-0.5).unwrap().to_string(), "0");
        assert_eq!(Eta::from_quotient(f64::NAN), None);
    }

    #[test]
    fn test_combined_rate() {
        let scenario = Scenario::new(1.0, vec![2.0, 2.0]);
        assert_eq!(scenario.combined_rate().unwrap(), 1.0);
    }
}
