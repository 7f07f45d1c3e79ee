//! Calculation logic for the salary engine.
//!
//! This module contains the rounding of monetary amounts, the progressive
//! bracket tax, the fixed-rate compensation tax, the social security
//! deduction, and the gross-to-net aggregation that composes them.

mod brackets_tax;
mod fixed_tax;
mod gross;
mod rounder;
mod social_security;

pub use brackets_tax::{
    BracketPortion, BracketsTaxResult, calculate_brackets_breakdown, calculate_brackets_tax,
};
pub use fixed_tax::calculate_fixed_tax;
pub use gross::calculate_gross;
pub use rounder::Rounder;
pub use social_security::SocialSecurity;
