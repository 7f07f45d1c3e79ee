//! Progressive bracket tax calculation.
//!
//! The taxable base is walked through an ascending bracket schedule. Each
//! bracket taxes only the slice of the base that falls inside it, so the
//! base carries over from one bracket into the next until it is used up.
//! The summed tax is rounded once at the end.
//!
//! When a social security salary is supplied, the social security deduction
//! is taken off the salary first. The reduced amount is the effective base:
//! it is both the value compared against the minimum taxable salary and the
//! value fed to the bracket walk.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::Bracket;

use super::rounder::Rounder;
use super::social_security::SocialSecurity;

/// The tax owed inside a single bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPortion {
    /// The bracket this portion belongs to.
    pub bracket: Bracket,
    /// The part of the effective base inside the bracket.
    pub taxable: Decimal,
    /// `taxable * bracket.rate`, unrounded.
    pub tax: Decimal,
}

/// The result of a bracket tax calculation with the detail behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketsTaxResult {
    /// The salary after the social security deduction, if any.
    pub taxable_base: Decimal,
    /// The social security deduction taken off before the walk.
    pub social_security_deduction: Decimal,
    /// Whether the base fell below the minimum taxable salary.
    pub below_minimum: bool,
    /// One portion per bracket, in schedule order. Empty when below the
    /// minimum taxable salary.
    pub portions: Vec<BracketPortion>,
    /// Sum of the portion taxes before rounding.
    pub unrounded: Decimal,
    /// The rounded tax owed.
    pub amount: Decimal,
}

/// Calculates the progressive tax on `amount`.
///
/// # Arguments
///
/// * `amount` - The gross salary
/// * `brackets` - The bracket schedule, ascending and non-overlapping
/// * `min_allowed_salary` - Effective bases below this owe no tax
/// * `rounder` - Rounds the summed tax
/// * `social_security` - Optional calculator and salary whose deduction is
///   taken off `amount` before the floor check and the walk
///
/// The schedule is not validated here; see
/// [`TaxDefinition::validate`](crate::models::TaxDefinition::validate).
///
/// # Errors
///
/// Returns [`EngineError::RoundingOverflow`](crate::error::EngineError::RoundingOverflow)
/// when the tax or the social security deduction cannot be rounded.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{calculate_brackets_tax, Rounder};
/// use salary_engine::models::{Bracket, RoundingMethod};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     Bracket::new(d("0"), Some(d("837000")), d("0")),
///     Bracket::new(d("837000"), Some(d("850000")), d("0.11")),
///     Bracket::new(d("850000"), Some(d("1100000")), d("0.13")),
///     Bracket::new(d("1100000"), Some(d("25000000")), d("0.15")),
/// ];
/// let rounder = Rounder::new(RoundingMethod::Ceiling, d("100")).unwrap();
///
/// let tax = calculate_brackets_tax(d("1000000"), &brackets, Decimal::ZERO, &rounder, None)?;
/// assert_eq!(tax, d("21000"));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn calculate_brackets_tax(
    amount: Decimal,
    brackets: &[Bracket],
    min_allowed_salary: Decimal,
    rounder: &Rounder,
    social_security: Option<(&SocialSecurity, Decimal)>,
) -> EngineResult<Decimal> {
    calculate_brackets_breakdown(
        amount,
        brackets,
        min_allowed_salary,
        rounder,
        social_security,
    )
    .map(|result| result.amount)
}

/// Calculates the progressive tax on `amount`, keeping the per-bracket
/// detail.
///
/// Takes the same arguments as [`calculate_brackets_tax`].
pub fn calculate_brackets_breakdown(
    amount: Decimal,
    brackets: &[Bracket],
    min_allowed_salary: Decimal,
    rounder: &Rounder,
    social_security: Option<(&SocialSecurity, Decimal)>,
) -> EngineResult<BracketsTaxResult> {
    let social_security_deduction = social_security
        .map(|(calculator, ss_salary)| calculator.calculate_deduction(ss_salary))
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let taxable_base = amount - social_security_deduction;

    if taxable_base < min_allowed_salary {
        debug!(
            taxable_base = %taxable_base,
            min_allowed_salary = %min_allowed_salary,
            "Taxable base below minimum, no bracket tax"
        );
        return Ok(BracketsTaxResult {
            taxable_base,
            social_security_deduction,
            below_minimum: true,
            portions: Vec::new(),
            unrounded: Decimal::ZERO,
            amount: Decimal::ZERO,
        });
    }

    let portions: Vec<BracketPortion> = brackets
        .iter()
        .map(|bracket| {
            let taxable = bracket.taxable_portion(taxable_base);
            BracketPortion {
                bracket: *bracket,
                taxable,
                tax: taxable * bracket.rate,
            }
        })
        .collect();

    if let Some(top) = brackets.last().and_then(|b| b.max).filter(|top| taxable_base > *top) {
        warn!(
            taxable_base = %taxable_base,
            top = %top,
            "Taxable base exceeds the last bracket, excess is untaxed"
        );
    }

    let unrounded: Decimal = portions.iter().map(|p| p.tax).sum();
    let amount = rounder.round(unrounded)?;

    Ok(BracketsTaxResult {
        taxable_base,
        social_security_deduction,
        below_minimum: false,
        portions,
        unrounded,
        amount,
    })
}
