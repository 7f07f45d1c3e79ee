//! Rounding configuration models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The rounding method applied to a monetary amount.
///
/// Each method decides which multiple of the granularity an amount lands
/// on. Names serialize in upper case and also accept the `ROUND_` prefixed
/// form (e.g. `ROUND_CEILING`).
///
/// # Example
///
/// ```
/// use salary_engine::models::RoundingMethod;
///
/// let method: RoundingMethod = serde_yaml::from_str("ROUND_HALF_UP").unwrap();
/// assert_eq!(method, RoundingMethod::HalfUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMethod {
    /// Round toward positive infinity.
    #[serde(rename = "CEILING", alias = "ROUND_CEILING")]
    Ceiling,
    /// Round toward negative infinity.
    #[serde(rename = "FLOOR", alias = "ROUND_FLOOR")]
    Floor,
    /// Round away from zero.
    #[serde(rename = "UP", alias = "ROUND_UP")]
    Up,
    /// Round toward zero.
    #[serde(rename = "DOWN", alias = "ROUND_DOWN")]
    Down,
    /// Round to nearest, ties away from zero.
    #[serde(rename = "HALF_UP", alias = "ROUND_HALF_UP")]
    HalfUp,
    /// Round to nearest, ties toward zero.
    #[serde(rename = "HALF_DOWN", alias = "ROUND_HALF_DOWN")]
    HalfDown,
    /// Round to nearest, ties to the even multiple.
    #[serde(rename = "HALF_EVEN", alias = "ROUND_HALF_EVEN")]
    HalfEven,
    /// Round toward zero, unless the last kept digit would be 0 or 5, in
    /// which case round away from zero.
    #[serde(rename = "05UP", alias = "ROUND_05UP")]
    ZeroFiveUp,
}

impl RoundingMethod {
    /// Returns the configuration name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMethod::Ceiling => "CEILING",
            RoundingMethod::Floor => "FLOOR",
            RoundingMethod::Up => "UP",
            RoundingMethod::Down => "DOWN",
            RoundingMethod::HalfUp => "HALF_UP",
            RoundingMethod::HalfDown => "HALF_DOWN",
            RoundingMethod::HalfEven => "HALF_EVEN",
            RoundingMethod::ZeroFiveUp => "05UP",
        }
    }
}

/// A rounding method paired with the granularity it rounds to.
///
/// # Example
///
/// ```
/// use salary_engine::models::{RoundingMethod, RoundingPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = RoundingPolicy::new(RoundingMethod::Ceiling, Decimal::from(100));
/// assert_eq!(policy.to_nearest, Decimal::from(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// How amounts are rounded.
    pub method: RoundingMethod,
    /// The unit amounts are rounded to (e.g. 100).
    pub to_nearest: Decimal,
}

impl RoundingPolicy {
    /// Creates a new rounding policy.
    pub fn new(method: RoundingMethod, to_nearest: Decimal) -> Self {
        Self { method, to_nearest }
    }

    /// The calculator-wide default for tax rounding: ceiling to 100.
    pub fn default_tax() -> Self {
        Self::new(RoundingMethod::Ceiling, Decimal::ONE_HUNDRED)
    }

    /// The calculator-wide default for social security rounding: ceiling to 1.
    pub fn default_social_security() -> Self {
        Self::new(RoundingMethod::Ceiling, Decimal::ONE)
    }
}
