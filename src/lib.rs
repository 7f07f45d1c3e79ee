//! Net Salary Engine
//!
//! This crate computes the net salary owed to an employee from a gross
//! salary, an optional compensation and an optional social security salary.
//! It applies a progressive bracket tax, a fixed-rate tax on compensation
//! and a social security deduction, each rounded to a configured
//! granularity.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
