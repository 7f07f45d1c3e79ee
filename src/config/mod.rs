//! Configuration loading and management for the salary engine.
//!
//! This module provides functionality to load tax and social security
//! definitions from YAML files, together with the calculator-wide rounding
//! and default ids.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! let tax = config.get_tax(None).unwrap();
//! println!("Default tax: {}", tax.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalculatorConfig, CalculatorSettings, SocialSecurityConfig, TaxesConfig};
