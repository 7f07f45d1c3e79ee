//! Core data models for the salary engine.
//!
//! This module contains the configuration records the calculators consume
//! and the breakdown they produce.

mod bracket;
mod gross_request;
mod rounding;
mod salary_breakdown;
mod social_security;
mod tax;

pub use bracket::Bracket;
pub use gross_request::GrossRequest;
pub use rounding::{RoundingMethod, RoundingPolicy};
pub use salary_breakdown::{COMPENSATION_RATIO_DP, Deduction, Gross, SalaryBreakdown, Taxes};
pub use social_security::SocialSecurityDefinition;
pub use tax::TaxDefinition;
