//! Rounding of monetary amounts to a configured granularity.
//!
//! Every deduction the engine produces passes through a [`Rounder`]. The
//! amount is scaled to units of the granularity, rounded to a whole number
//! of units with the configured method, and scaled back, all in exact
//! decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{RoundingMethod, RoundingPolicy};

/// Rounds amounts to a multiple of `to_nearest` using a [`RoundingMethod`].
///
/// A `Rounder` can only be built with a strictly positive granularity.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::Rounder;
/// use salary_engine::models::RoundingMethod;
/// use rust_decimal::Decimal;
///
/// let rounder = Rounder::new(RoundingMethod::Ceiling, Decimal::from(100)).unwrap();
/// assert_eq!(rounder.round(Decimal::from(20_930))?, Decimal::from(21_000));
///
/// let invalid = Rounder::new(RoundingMethod::Ceiling, Decimal::ZERO);
/// assert!(invalid.is_err());
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounder {
    method: RoundingMethod,
    to_nearest: Decimal,
}

impl Rounder {
    /// Creates a rounder.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRoundingGranularity`] when `to_nearest`
    /// is zero or negative.
    pub fn new(method: RoundingMethod, to_nearest: Decimal) -> EngineResult<Self> {
        if to_nearest <= Decimal::ZERO {
            return Err(EngineError::InvalidRoundingGranularity { to_nearest });
        }
        Ok(Self { method, to_nearest })
    }

    /// Creates a rounder from a configured policy.
    pub fn from_policy(policy: RoundingPolicy) -> EngineResult<Self> {
        Self::new(policy.method, policy.to_nearest)
    }

    /// Returns the rounding method.
    pub fn method(&self) -> RoundingMethod {
        self.method
    }

    /// Returns the rounding granularity.
    pub fn to_nearest(&self) -> Decimal {
        self.to_nearest
    }

    /// Rounds `amount` to a multiple of the granularity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RoundingOverflow`] when `amount` expressed in
    /// units of the granularity does not fit in a `Decimal`.
    pub fn round(&self, amount: Decimal) -> EngineResult<Decimal> {
        let overflow = || EngineError::RoundingOverflow {
            amount,
            to_nearest: self.to_nearest,
        };
        let units = amount.checked_div(self.to_nearest).ok_or_else(overflow)?;
        let whole_units = match self.method {
            RoundingMethod::Ceiling => units.ceil(),
            RoundingMethod::Floor => units.floor(),
            RoundingMethod::Up => units.round_dp_with_strategy(0, RoundingStrategy::AwayFromZero),
            RoundingMethod::Down => units.trunc(),
            RoundingMethod::HalfUp => {
                units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingMethod::HalfDown => {
                units.round_dp_with_strategy(0, RoundingStrategy::MidpointTowardZero)
            }
            RoundingMethod::HalfEven => {
                units.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            }
            RoundingMethod::ZeroFiveUp => zero_five_up(units),
        };
        whole_units.checked_mul(self.to_nearest).ok_or_else(overflow)
    }
}

impl From<Rounder> for RoundingPolicy {
    fn from(rounder: Rounder) -> Self {
        RoundingPolicy::new(rounder.method, rounder.to_nearest)
    }
}

/// Truncates toward zero, stepping away from zero instead when the
/// truncated value ends in 0 or 5.
fn zero_five_up(units: Decimal) -> Decimal {
    let truncated = units.trunc();
    if truncated == units {
        return truncated;
    }

    let last_digit = truncated.abs() % Decimal::TEN;
    if last_digit.is_zero() || last_digit == Decimal::from(5) {
        if units.is_sign_negative() {
            truncated - Decimal::ONE
        } else {
            truncated + Decimal::ONE
        }
    } else {
        truncated
    }
}
