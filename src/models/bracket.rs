//! Tax bracket model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A salary sub-range taxed at a single flat rate.
///
/// The lower bound is inclusive. An absent upper bound means the bracket
/// extends without limit, which is only meaningful for the last bracket of
/// a tax definition.
///
/// # Example
///
/// ```
/// use salary_engine::models::Bracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = Bracket::new(
///     Decimal::from(837_000),
///     Some(Decimal::from(850_000)),
///     Decimal::from_str("0.11").unwrap(),
/// );
/// assert_eq!(bracket.width(), Some(Decimal::from(13_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// The inclusive lower bound of the bracket.
    pub min: Decimal,
    /// The upper bound of the bracket, or `None` when unbounded.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// The fraction of the in-bracket amount owed as tax.
    pub rate: Decimal,
}

impl Bracket {
    /// Creates a new bracket.
    pub fn new(min: Decimal, max: Option<Decimal>, rate: Decimal) -> Self {
        Self { min, max, rate }
    }

    /// Returns the part of `base` that falls inside this bracket.
    ///
    /// Never negative: a base below the bracket yields zero.
    pub fn taxable_portion(&self, base: Decimal) -> Decimal {
        let upper = match self.max {
            Some(max) => base.min(max),
            None => base,
        };
        (upper - self.min).max(Decimal::ZERO)
    }

    /// Returns the size of the bracket, or `None` for an unbounded bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }
}
