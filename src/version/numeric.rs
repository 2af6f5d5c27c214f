// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Digit-run extraction and the 32-bit, 64-bit, arbitrary-precision, double
//! fallback used when a component does not fit in an `i32`.

use crate::version::ConsistencyViolation;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Numeric representations available to the parser.
///
/// Without `big_integer` the arbitrary-precision tier is skipped and digit runs
/// past the 64-bit range go straight to the double tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericCapabilities {
    pub big_integer: bool,
}

impl NumericCapabilities {
    pub fn full() -> Self {
        Self { big_integer: true }
    }

    pub fn without_big_integer() -> Self {
        Self { big_integer: false }
    }
}

impl Default for NumericCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericTier {
    Int32,
    Int64,
    BigInteger,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TieredValue {
    /// The run fits a non-negative `i32`.
    Fits(i32),
    /// The run exceeds `i32::MAX`; `excess` is `value - i32::MAX` in decimal.
    Saturated { tier: NumericTier, excess: String },
    /// Too large even for a finite double.
    Unrepresentable,
}

/// Splits off the longest leading run of ASCII digits.
pub fn split_leading_digits(segment: &str) -> (&str, &str) {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(end)
}

/// Interprets a digit run, trying each tier in order and stopping at the first
/// that holds it.
///
/// `digits` must be a non-empty run of ASCII digits. Anything the 32-bit or
/// 64-bit tier rejects for a reason other than overflow is reported as a
/// [`ConsistencyViolation`].
pub fn tiered_parse(
    digits: &str,
    capabilities: NumericCapabilities,
) -> Result<TieredValue, ConsistencyViolation> {
    match digits.parse::<i32>() {
        Ok(value) => return Ok(TieredValue::Fits(value)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {}
        Err(e) => {
            return Err(ConsistencyViolation::new(format!(
                "32-bit conversion of digit run '{digits}' failed: {e}"
            )));
        }
    }

    match digits.parse::<i64>() {
        Ok(value) => {
            return Ok(TieredValue::Saturated {
                tier: NumericTier::Int64,
                excess: (value - i64::from(i32::MAX)).to_string(),
            });
        }
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {}
        Err(e) => {
            return Err(ConsistencyViolation::new(format!(
                "64-bit conversion of digit run '{digits}' failed: {e}"
            )));
        }
    }

    if capabilities.big_integer {
        return match digits.parse::<BigInt>() {
            Ok(value) => Ok(TieredValue::Saturated {
                tier: NumericTier::BigInteger,
                excess: (value - BigInt::from(i32::MAX)).to_string(),
            }),
            Err(e) => Err(ConsistencyViolation::new(format!(
                "arbitrary-precision conversion of digit run '{digits}' failed: {e}"
            ))),
        };
    }

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(TieredValue::Saturated {
            tier: NumericTier::Double,
            excess: (value - f64::from(i32::MAX)).to_string(),
        }),
        _ => {
            log::debug!(
                "Digit run of {} characters exceeds double range; keeping it as text",
                digits.len()
            );
            Ok(TieredValue::Unrepresentable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_leading_digits() {
        assert_eq!(split_leading_digits("4-beta3"), ("4", "-beta3"));
        assert_eq!(split_leading_digits("123"), ("123", ""));
        assert_eq!(split_leading_digits("beta"), ("", "beta"));
        assert_eq!(split_leading_digits(""), ("", ""));
        assert_eq!(split_leading_digits("00x1"), ("00", "x1"));
    }

    #[test]
    fn test_split_leading_digits_non_ascii() {
        // Non-ASCII digits are not part of the run
        assert_eq!(split_leading_digits("1٣"), ("1", "٣"));
        assert_eq!(split_leading_digits("ü2"), ("", "ü2"));
    }

    #[test]
    fn test_int32_tier() {
        let caps = NumericCapabilities::full();
        assert_eq!(tiered_parse("0", caps), Ok(TieredValue::Fits(0)));
        assert_eq!(
            tiered_parse("2147483647", caps),
            Ok(TieredValue::Fits(i32::MAX))
        );
    }

    #[test]
    fn test_int64_tier() {
        let caps = NumericCapabilities::full();
        assert_eq!(
            tiered_parse("2147483700", caps),
            Ok(TieredValue::Saturated {
                tier: NumericTier::Int64,
                excess: "53".to_string(),
            })
        );
        assert_eq!(
            tiered_parse("9223372036854775807", caps),
            Ok(TieredValue::Saturated {
                tier: NumericTier::Int64,
                excess: "9223372034707292160".to_string(),
            })
        );
    }

    #[test]
    fn test_big_integer_tier() {
        let caps = NumericCapabilities::full();
        assert_eq!(
            tiered_parse("9223372036854775808", caps),
            Ok(TieredValue::Saturated {
                tier: NumericTier::BigInteger,
                excess: "9223372034707292161".to_string(),
            })
        );

        let huge = "9".repeat(400);
        match tiered_parse(&huge, caps) {
            Ok(TieredValue::Saturated { tier, excess }) => {
                assert_eq!(tier, NumericTier::BigInteger);
                assert_eq!(excess.len(), 400);
                assert!(excess.ends_with("7852516352"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_double_tier_without_big_integer() {
        let caps = NumericCapabilities::without_big_integer();

        // Still within 64-bit: the double tier is never reached
        assert_eq!(
            tiered_parse("2147483700", caps),
            Ok(TieredValue::Saturated {
                tier: NumericTier::Int64,
                excess: "53".to_string(),
            })
        );

        match tiered_parse("100000000000000000000", caps) {
            Ok(TieredValue::Saturated { tier, excess }) => {
                assert_eq!(tier, NumericTier::Double);
                let value: f64 = excess.parse().unwrap();
                assert_eq!(value, 1e20 - f64::from(i32::MAX));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_double_overflow_is_unrepresentable() {
        let caps = NumericCapabilities::without_big_integer();
        let huge = "9".repeat(400);
        assert_eq!(tiered_parse(&huge, caps), Ok(TieredValue::Unrepresentable));
    }

    #[test]
    fn test_empty_run_is_a_violation() {
        let result = tiered_parse("", NumericCapabilities::full());
        let violation = result.unwrap_err();
        assert!(violation.message.contains("32-bit"));
    }
}
