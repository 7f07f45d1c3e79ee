//! Gross salary calculation request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The salary figures a breakdown is calculated from.
///
/// Compensation defaults to zero and the social security salary is
/// optional; without it no social security is deducted.
///
/// # Example
///
/// ```
/// use salary_engine::models::GrossRequest;
/// use rust_decimal::Decimal;
///
/// let request: GrossRequest = serde_json::from_str(r#"{"salary": "1000000"}"#).unwrap();
/// assert_eq!(request.salary, Decimal::from(1_000_000));
/// assert_eq!(request.compensation, Decimal::ZERO);
/// assert_eq!(request.ss_salary, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossRequest {
    /// The gross base salary.
    pub salary: Decimal,
    /// Compensation paid on top of the salary.
    #[serde(default)]
    pub compensation: Decimal,
    /// The salary social security is computed on.
    #[serde(default)]
    pub ss_salary: Option<Decimal>,
}

impl GrossRequest {
    /// Creates a request for a salary with no compensation and no social
    /// security salary.
    pub fn new(salary: Decimal) -> Self {
        Self {
            salary,
            compensation: Decimal::ZERO,
            ss_salary: None,
        }
    }

    /// Sets the compensation.
    pub fn with_compensation(mut self, compensation: Decimal) -> Self {
        self.compensation = compensation;
        self
    }

    /// Sets the social security salary.
    pub fn with_ss_salary(mut self, ss_salary: Decimal) -> Self {
        self.ss_salary = Some(ss_salary);
        self
    }
}
