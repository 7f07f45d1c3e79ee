//! Tax definition model.
//!
//! A [`TaxDefinition`] is the configuration record a calculation is run
//! against: the bracket schedule, the floor below which no bracket tax is
//! owed, and the flat rate applied to compensation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Bracket, RoundingPolicy};

/// A progressive tax scheme with a fixed-rate compensation tax.
///
/// # Example
///
/// ```
/// use salary_engine::models::{Bracket, TaxDefinition};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = TaxDefinition {
///     id: 1,
///     name: "Income tax".to_string(),
///     min_allowed_salary: Decimal::ZERO,
///     fixed_tax_rate: Decimal::from_str("0.05").unwrap(),
///     compensation_rate: Decimal::from_str("0.75").unwrap(),
///     rounding: None,
///     brackets: vec![Bracket::new(Decimal::ZERO, None, Decimal::from_str("0.1").unwrap())],
/// };
/// assert!(tax.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDefinition {
    /// Identifier used to select this definition.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Salaries whose effective base is below this floor owe no bracket tax.
    pub min_allowed_salary: Decimal,
    /// Flat rate applied to compensation.
    pub fixed_tax_rate: Decimal,
    /// Share of a salary that may be paid as compensation. Informational.
    #[serde(default)]
    pub compensation_rate: Decimal,
    /// Rounding for taxes under this definition; the calculator-wide tax
    /// rounding applies when absent.
    #[serde(default)]
    pub rounding: Option<RoundingPolicy>,
    /// Brackets ordered ascending by `min`.
    pub brackets: Vec<Bracket>,
}

impl TaxDefinition {
    /// Returns the rounding policy for this definition, or `fallback` when
    /// the definition does not carry its own.
    pub fn rounding_or(&self, fallback: RoundingPolicy) -> RoundingPolicy {
        self.rounding.unwrap_or(fallback)
    }

    /// Checks that the definition can be fed to the calculators.
    ///
    /// The bracket schedule must start at zero, be sorted, contiguous and
    /// non-overlapping, and only its last bracket may be unbounded. All
    /// rates must lie in `[0, 1]` and amounts must be non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBrackets`], [`EngineError::InvalidRate`],
    /// [`EngineError::InvalidAmount`] or
    /// [`EngineError::InvalidRoundingGranularity`] describing the first
    /// problem found.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_allowed_salary < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                field: format!("{}.min_allowed_salary", self.name),
                amount: self.min_allowed_salary,
            });
        }
        check_rate(&format!("{}.fixed_tax_rate", self.name), self.fixed_tax_rate)?;
        check_rate(
            &format!("{}.compensation_rate", self.name),
            self.compensation_rate,
        )?;
        if let Some(policy) = self.rounding {
            check_granularity(policy)?;
        }
        self.validate_brackets()
    }

    fn validate_brackets(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidBrackets {
            tax: self.name.clone(),
            message,
        };

        let first = self
            .brackets
            .first()
            .ok_or_else(|| invalid("at least one bracket is required".to_string()))?;
        if !first.min.is_zero() {
            return Err(invalid(format!(
                "first bracket must start at 0, starts at {}",
                first.min
            )));
        }

        let last_index = self.brackets.len() - 1;
        for (index, bracket) in self.brackets.iter().enumerate() {
            let number = index + 1;
            check_rate(&format!("{}.brackets[{}].rate", self.name, number), bracket.rate)?;

            match bracket.max {
                Some(max) if max <= bracket.min => {
                    return Err(invalid(format!(
                        "bracket {} has max {} not greater than min {}",
                        number, max, bracket.min
                    )));
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        number
                    )));
                }
                _ => {}
            }

            if index > 0 {
                let previous = &self.brackets[index - 1];
                // Only the last bracket may be unbounded, checked above.
                let previous_max = previous.max.unwrap_or(previous.min);
                if bracket.min < previous_max {
                    return Err(invalid(format!(
                        "bracket {} starting at {} overlaps bracket {} ending at {}",
                        number, bracket.min, index, previous_max
                    )));
                }
                if bracket.min > previous_max {
                    return Err(invalid(format!(
                        "gap between bracket {} ending at {} and bracket {} starting at {}",
                        index, previous_max, number, bracket.min
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Rejects a rate outside `[0, 1]`.
pub(crate) fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            rate,
        });
    }
    Ok(())
}

/// Rejects a rounding policy with a non-positive granularity.
pub(crate) fn check_granularity(policy: RoundingPolicy) -> EngineResult<()> {
    if policy.to_nearest <= Decimal::ZERO {
        return Err(EngineError::InvalidRoundingGranularity {
            to_nearest: policy.to_nearest,
        });
    }
    Ok(())
}
