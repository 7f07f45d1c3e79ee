//! Fixed-rate tax on compensation.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::rounder::Rounder;

/// Applies a flat `fixed_tax_rate` to `amount` and rounds the result.
///
/// There is no floor and no bracket schedule. Note that a rounding method
/// such as `CEILING` lifts any positive sub-granularity tax to a full
/// granularity step.
///
/// # Errors
///
/// Returns [`EngineError::RoundingOverflow`](crate::error::EngineError::RoundingOverflow)
/// when the tax cannot be rounded to the rounder's granularity.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{calculate_fixed_tax, Rounder};
/// use salary_engine::models::RoundingMethod;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounder = Rounder::new(RoundingMethod::Ceiling, Decimal::from(100)).unwrap();
/// let tax = calculate_fixed_tax(
///     Decimal::from(500_000),
///     Decimal::from_str("0.05").unwrap(),
///     &rounder,
/// )?;
/// assert_eq!(tax, Decimal::from(25_000));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn calculate_fixed_tax(
    amount: Decimal,
    fixed_tax_rate: Decimal,
    rounder: &Rounder,
) -> EngineResult<Decimal> {
    rounder.round(amount * fixed_tax_rate)
}
