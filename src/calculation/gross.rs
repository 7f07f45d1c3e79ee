//! Gross-to-net salary aggregation.
//!
//! This is the entry point of the engine. It takes the social security
//! deduction first (when requested), runs the bracket tax on the salary with
//! that deduction taken into account, runs the fixed tax on the
//! compensation, and assembles the [`SalaryBreakdown`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Deduction, Gross, SalaryBreakdown, TaxDefinition, Taxes};

use super::brackets_tax::calculate_brackets_breakdown;
use super::fixed_tax::calculate_fixed_tax;
use super::rounder::Rounder;
use super::social_security::SocialSecurity;

/// Calculates the gross-to-net breakdown of a salary.
///
/// # Arguments
///
/// * `salary` - The gross base salary, strictly positive
/// * `compensation` - Compensation paid on top of the salary, taxed at the
///   fixed rate
/// * `tax` - The tax definition supplying brackets, floor and fixed rate
/// * `rounder` - Rounds the bracket tax and the fixed tax
/// * `ss` - The social security scheme, if any
/// * `ss_salary` - The salary social security is computed on
///
/// Social security is only deducted when both `ss` and `ss_salary` are
/// given. Its deduction lowers the base the bracket tax is computed on.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] when `salary` is not strictly
/// positive, or when `compensation` or `ss_salary` is negative, and
/// [`EngineError::RoundingOverflow`] when a deduction cannot be rounded.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{calculate_gross, Rounder, SocialSecurity};
/// use salary_engine::models::{Bracket, RoundingMethod, TaxDefinition};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let tax = TaxDefinition {
///     id: 1,
///     name: "Income tax".to_string(),
///     min_allowed_salary: Decimal::ZERO,
///     fixed_tax_rate: d("0.05"),
///     compensation_rate: d("0.75"),
///     rounding: None,
///     brackets: vec![
///         Bracket::new(d("0"), Some(d("837000")), d("0")),
///         Bracket::new(d("837000"), Some(d("850000")), d("0.11")),
///         Bracket::new(d("850000"), Some(d("1100000")), d("0.13")),
///         Bracket::new(d("1100000"), Some(d("25000000")), d("0.15")),
///     ],
/// };
/// let rounder = Rounder::new(RoundingMethod::Ceiling, d("100")).unwrap();
///
/// let breakdown = calculate_gross(d("1000000"), d("500000"), &tax, &rounder, None, None).unwrap();
/// assert_eq!(breakdown.deduction.taxes.brackets, d("21000"));
/// assert_eq!(breakdown.deduction.taxes.fixed, d("25000"));
/// assert_eq!(breakdown.net, d("1454000"));
/// ```
pub fn calculate_gross(
    salary: Decimal,
    compensation: Decimal,
    tax: &TaxDefinition,
    rounder: &Rounder,
    ss: Option<&SocialSecurity>,
    ss_salary: Option<Decimal>,
) -> EngineResult<SalaryBreakdown> {
    if salary <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: "salary".to_string(),
            amount: salary,
        });
    }
    if compensation < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: "compensation".to_string(),
            amount: compensation,
        });
    }
    if let Some(ss_salary) = ss_salary.filter(|s| *s < Decimal::ZERO) {
        return Err(EngineError::InvalidAmount {
            field: "ss_salary".to_string(),
            amount: ss_salary,
        });
    }

    let brackets = calculate_brackets_breakdown(
        salary,
        &tax.brackets,
        tax.min_allowed_salary,
        rounder,
        ss.zip(ss_salary),
    )?;
    let brackets_tax = brackets.amount;
    let social_security_deduction = brackets.social_security_deduction;
    let fixed_tax = calculate_fixed_tax(compensation, tax.fixed_tax_rate, rounder)?;

    let breakdown = SalaryBreakdown::new(
        Gross::new(salary, compensation),
        Deduction::new(Taxes::new(brackets_tax, fixed_tax), social_security_deduction),
    );

    debug!(
        tax = %tax.name,
        salary = %salary,
        compensation = %compensation,
        brackets_tax = %brackets_tax,
        fixed_tax = %fixed_tax,
        social_security = %social_security_deduction,
        net = %breakdown.net,
        "Salary breakdown calculated"
    );

    Ok(breakdown)
}
