//! Social security definition model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RoundingPolicy;
use super::tax::{check_granularity, check_rate};

/// A social security scheme: a flat deduction above a minimum salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityDefinition {
    /// Identifier used to select this definition.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Fraction of the social security salary that is deducted.
    pub deduction_rate: Decimal,
    /// Salaries below this floor are not deducted.
    pub min_allowed_salary: Decimal,
    /// Rounding for the deduction; the calculator-wide social security
    /// rounding applies when absent.
    #[serde(default)]
    pub rounding: Option<RoundingPolicy>,
}

impl SocialSecurityDefinition {
    /// Returns the rounding policy for this definition, or `fallback`.
    pub fn rounding_or(&self, fallback: RoundingPolicy) -> RoundingPolicy {
        self.rounding.unwrap_or(fallback)
    }

    /// Checks the rate, floor and rounding of the definition.
    pub fn validate(&self) -> EngineResult<()> {
        check_rate(&format!("{}.deduction_rate", self.name), self.deduction_rate)?;
        if self.min_allowed_salary < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                field: format!("{}.min_allowed_salary", self.name),
                amount: self.min_allowed_salary,
            });
        }
        if let Some(policy) = self.rounding {
            check_granularity(policy)?;
        }
        Ok(())
    }
}
