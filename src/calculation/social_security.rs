//! Social security deduction calculation.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{RoundingPolicy, SocialSecurityDefinition};

use super::rounder::Rounder;

/// A social security scheme bound to the rounder used for its deduction.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{Rounder, SocialSecurity};
/// use salary_engine::models::RoundingMethod;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ss = SocialSecurity::new(
///     Decimal::from(750_000),
///     Decimal::from_str("0.07").unwrap(),
///     Rounder::new(RoundingMethod::Ceiling, Decimal::ONE).unwrap(),
/// );
/// assert_eq!(ss.calculate_deduction(Decimal::from(1_000_000))?, Decimal::from(70_000));
/// assert_eq!(ss.calculate_deduction(Decimal::from(700_000))?, Decimal::ZERO);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialSecurity {
    min_salary: Decimal,
    deduction_rate: Decimal,
    rounder: Rounder,
}

impl SocialSecurity {
    /// Creates a social security calculator.
    pub fn new(min_salary: Decimal, deduction_rate: Decimal, rounder: Rounder) -> Self {
        Self {
            min_salary,
            deduction_rate,
            rounder,
        }
    }

    /// Binds a configured definition to a rounder built from its own
    /// rounding policy, or from `fallback` when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRoundingGranularity`](crate::error::EngineError::InvalidRoundingGranularity)
    /// when the chosen policy has a non-positive granularity.
    pub fn from_definition(
        definition: &SocialSecurityDefinition,
        fallback: RoundingPolicy,
    ) -> EngineResult<Self> {
        let rounder = Rounder::from_policy(definition.rounding_or(fallback))?;
        Ok(Self::new(
            definition.min_allowed_salary,
            definition.deduction_rate,
            rounder,
        ))
    }

    /// Returns the salary below which nothing is deducted.
    pub fn min_salary(&self) -> Decimal {
        self.min_salary
    }

    /// Returns the deduction rate.
    pub fn deduction_rate(&self) -> Decimal {
        self.deduction_rate
    }

    /// Returns the rounder applied to the deduction.
    pub fn rounder(&self) -> &Rounder {
        &self.rounder
    }

    /// Calculates the deduction owed on `ss_salary`.
    ///
    /// Salaries below the minimum are not deducted; otherwise the rate is
    /// applied and the result rounded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RoundingOverflow`](crate::error::EngineError::RoundingOverflow)
    /// when the deduction cannot be rounded to the rounder's granularity.
    pub fn calculate_deduction(&self, ss_salary: Decimal) -> EngineResult<Decimal> {
        if ss_salary < self.min_salary {
            return Ok(Decimal::ZERO);
        }
        self.rounder.round(ss_salary * self.deduction_rate)
    }
}
