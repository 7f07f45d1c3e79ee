//! Salary breakdown models.
//!
//! This module contains the [`SalaryBreakdown`] type and its parts, which
//! capture the gross side, the deductions and the resulting net salary of
//! a single calculation. The totals are derived when a part is built, so a
//! breakdown built through the constructors always satisfies
//! `net == gross.total - deduction.total`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places of the compensation-to-total ratio.
pub const COMPENSATION_RATIO_DP: u32 = 2;

/// The gross side of a salary: base salary plus compensation.
///
/// # Example
///
/// ```
/// use salary_engine::models::Gross;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let gross = Gross::new(Decimal::from(1_000_000), Decimal::from(500_000));
/// assert_eq!(gross.total, Decimal::from(1_500_000));
/// assert_eq!(gross.compensation_to_total, Decimal::from_str("0.33").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gross {
    /// The gross base salary.
    pub salary: Decimal,
    /// The gross compensation paid on top of the salary.
    pub compensation: Decimal,
    /// Salary plus compensation.
    pub total: Decimal,
    /// Compensation divided by total, rounded half-even to exactly two places.
    pub compensation_to_total: Decimal,
}

impl Gross {
    /// Builds the gross side, deriving the total and the ratio.
    pub fn new(salary: Decimal, compensation: Decimal) -> Self {
        let total = salary + compensation;
        let mut compensation_to_total = if total.is_zero() {
            Decimal::ZERO
        } else {
            (compensation / total).round_dp_with_strategy(
                COMPENSATION_RATIO_DP,
                RoundingStrategy::MidpointNearestEven,
            )
        };
        compensation_to_total.rescale(COMPENSATION_RATIO_DP);

        Self {
            salary,
            compensation,
            total,
            compensation_to_total,
        }
    }
}

/// The tax part of the deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxes {
    /// Progressive tax on the salary.
    pub brackets: Decimal,
    /// Flat tax on the compensation.
    pub fixed: Decimal,
    /// Bracket tax plus fixed tax.
    pub total: Decimal,
}

impl Taxes {
    /// Builds the tax part, deriving the total.
    pub fn new(brackets: Decimal, fixed: Decimal) -> Self {
        Self {
            brackets,
            fixed,
            total: brackets + fixed,
        }
    }
}

/// Everything withheld from the gross total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// The taxes owed.
    pub taxes: Taxes,
    /// The social security deduction.
    pub social_security: Decimal,
    /// Taxes plus social security.
    pub total: Decimal,
}

impl Deduction {
    /// Builds the deductions, deriving the total.
    pub fn new(taxes: Taxes, social_security: Decimal) -> Self {
        let total = taxes.total + social_security;
        Self {
            taxes,
            social_security,
            total,
        }
    }
}

/// The complete gross-to-net view of a salary.
///
/// # Example
///
/// ```
/// use salary_engine::models::{Deduction, Gross, SalaryBreakdown, Taxes};
/// use rust_decimal::Decimal;
///
/// let breakdown = SalaryBreakdown::new(
///     Gross::new(Decimal::from(1_000_000), Decimal::ZERO),
///     Deduction::new(Taxes::new(Decimal::from(21_000), Decimal::ZERO), Decimal::from(70_000)),
/// );
/// assert_eq!(breakdown.net, Decimal::from(909_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Gross salary and compensation.
    pub gross: Gross,
    /// Taxes and social security.
    pub deduction: Deduction,
    /// Gross total minus deduction total.
    pub net: Decimal,
}

impl SalaryBreakdown {
    /// Builds the breakdown, deriving the net salary.
    pub fn new(gross: Gross, deduction: Deduction) -> Self {
        let net = gross.total - deduction.total;
        Self {
            gross,
            deduction,
            net,
        }
    }
}
