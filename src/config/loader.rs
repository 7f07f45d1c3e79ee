//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax and
//! social security definitions from YAML files, selecting definitions by
//! id or by default, and running calculations against them.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::calculation::{Rounder, SocialSecurity, calculate_gross};
use crate::error::{EngineError, EngineResult};
use crate::models::{GrossRequest, SalaryBreakdown, SocialSecurityDefinition, TaxDefinition};

use super::types::{CalculatorConfig, CalculatorSettings, SocialSecurityConfig, TaxesConfig};

/// Loads and provides access to the calculator configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── calculator.yaml       # Rounding and default ids (optional)
/// ├── taxes.yaml            # Tax definitions with brackets
/// └── social_security.yaml  # Social security definitions (optional)
/// ```
///
/// A missing `calculator.yaml` yields the default settings; a missing
/// `social_security.yaml` yields no social security definitions.
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::GrossRequest;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let request = GrossRequest::new(Decimal::from(1_000_000));
/// let breakdown = loader.calculate(&request, None, None)?;
/// println!("Net salary: {}", breakdown.net);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `taxes.yaml` is missing, if any file contains
    /// invalid YAML, or if the loaded definitions fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings =
            Self::load_optional_yaml::<CalculatorSettings>(&path.join("calculator.yaml"))?
                .unwrap_or_default();

        let taxes = Self::load_yaml::<TaxesConfig>(&path.join("taxes.yaml"))?.taxes;

        let social_security =
            Self::load_optional_yaml::<SocialSecurityConfig>(&path.join("social_security.yaml"))?
                .map(|c| c.social_security)
                .unwrap_or_default();

        let loader = Self::from_parts(settings, taxes, social_security)?;
        info!(
            path = %path.display(),
            taxes = loader.config.taxes().len(),
            social_security = loader.config.social_security().len(),
            "Loaded calculator configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from in-memory definitions, applying the same
    /// validation as [`ConfigLoader::load`].
    pub fn from_parts(
        settings: CalculatorSettings,
        taxes: Vec<TaxDefinition>,
        social_security: Vec<SocialSecurityDefinition>,
    ) -> EngineResult<Self> {
        let config = CalculatorConfig::new(settings, taxes, social_security)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and parses a YAML file that may be absent.
    fn load_optional_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
        if !path.exists() {
            debug!(path = %path.display(), "Optional configuration file absent");
            return Ok(None);
        }
        Self::load_yaml(path).map(Some)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the calculator-wide settings.
    pub fn settings(&self) -> &CalculatorSettings {
        self.config.settings()
    }

    /// Gets a tax definition by id, or the default one when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TaxNotFound`] for an unknown id, or
    /// [`EngineError::NoDefaultTax`] when no id is given and no default is
    /// configured.
    pub fn get_tax(&self, id: Option<u32>) -> EngineResult<&TaxDefinition> {
        let id = id
            .or(self.settings().default_tax_id)
            .ok_or(EngineError::NoDefaultTax)?;
        self.config
            .taxes()
            .get(&id)
            .ok_or(EngineError::TaxNotFound { id })
    }

    /// Gets a social security definition by id, or the default one when
    /// `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SocialSecurityNotFound`] for an unknown id, or
    /// [`EngineError::NoDefaultSocialSecurity`] when no id is given and no
    /// default is configured.
    pub fn get_social_security(&self, id: Option<u32>) -> EngineResult<&SocialSecurityDefinition> {
        let id = id
            .or(self.settings().default_ss_id)
            .ok_or(EngineError::NoDefaultSocialSecurity)?;
        self.config
            .social_security()
            .get(&id)
            .ok_or(EngineError::SocialSecurityNotFound { id })
    }

    /// Builds the rounder for taxes under `tax`: its own policy if it has
    /// one, otherwise the calculator-wide tax rounding.
    pub fn tax_rounder(&self, tax: &TaxDefinition) -> EngineResult<Rounder> {
        Rounder::from_policy(tax.rounding_or(self.settings().tax_rounding))
    }

    /// Binds a social security definition to its rounder, falling back to
    /// the calculator-wide social security rounding.
    pub fn social_security(
        &self,
        definition: &SocialSecurityDefinition,
    ) -> EngineResult<SocialSecurity> {
        SocialSecurity::from_definition(definition, self.settings().ss_rounding)
    }

    /// Calculates a salary breakdown against the selected definitions.
    ///
    /// `tax_id` and `ss_id` select definitions explicitly; `None` selects the
    /// configured defaults. The social security definition is only resolved
    /// when the request carries a social security salary.
    ///
    /// # Errors
    ///
    /// Returns lookup errors from [`ConfigLoader::get_tax`] and
    /// [`ConfigLoader::get_social_security`], and
    /// [`EngineError::InvalidAmount`] or [`EngineError::RoundingOverflow`]
    /// from the calculation itself.
    pub fn calculate(
        &self,
        request: &GrossRequest,
        tax_id: Option<u32>,
        ss_id: Option<u32>,
    ) -> EngineResult<SalaryBreakdown> {
        let tax = self.get_tax(tax_id)?;
        let rounder = self.tax_rounder(tax)?;

        let social_security = match request.ss_salary {
            Some(_) => Some(self.social_security(self.get_social_security(ss_id)?)?),
            None => None,
        };

        calculate_gross(
            request.salary,
            request.compensation,
            tax,
            &rounder,
            social_security.as_ref(),
            request.ss_salary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bracket, RoundingMethod, RoundingPolicy};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_tax(id: u32, rounding: Option<RoundingPolicy>) -> TaxDefinition {
        TaxDefinition {
            id,
            name: format!("tax {}", id),
            min_allowed_salary: Decimal::ZERO,
            fixed_tax_rate: dec("0.05"),
            compensation_rate: dec("0.75"),
            rounding,
            brackets: vec![Bracket::new(Decimal::ZERO, None, dec("0.1"))],
        }
    }

    fn create_test_social_security(id: u32) -> SocialSecurityDefinition {
        SocialSecurityDefinition {
            id,
            name: format!("ss {}", id),
            deduction_rate: dec("0.07"),
            min_allowed_salary: dec("750000"),
            rounding: None,
        }
    }

    fn create_in_memory_loader(settings: CalculatorSettings) -> ConfigLoader {
        ConfigLoader::from_parts(
            settings,
            vec![
                create_test_tax(1, None),
                create_test_tax(
                    2,
                    Some(RoundingPolicy::new(RoundingMethod::Floor, dec("1000"))),
                ),
            ],
            vec![create_test_social_security(1), create_test_social_security(2)],
        )
        .unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().default_tax_id, Some(1));
        assert_eq!(loader.settings().default_ss_id, Some(1));
        assert_eq!(loader.settings().tax_rounding.to_nearest, dec("100"));
    }

    #[test]
    fn test_default_tax_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let tax = loader.get_tax(None).unwrap();
        assert_eq!(tax.id, 1);
        assert_eq!(tax.min_allowed_salary, dec("837000"));
        assert_eq!(tax.fixed_tax_rate, dec("0.05"));
        assert_eq!(tax.brackets.len(), 4);
        assert_eq!(tax.brackets[1].rate, dec("0.11"));
        assert_eq!(tax.brackets[3].max, Some(dec("25000000")));
    }

    #[test]
    fn test_default_social_security_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let ss = loader.get_social_security(None).unwrap();
        assert_eq!(ss.deduction_rate, dec("0.07"));
        assert_eq!(ss.min_allowed_salary, dec("750000"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("taxes.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_tax_by_id() {
        let loader = create_in_memory_loader(CalculatorSettings::default());
        assert_eq!(loader.get_tax(Some(2)).unwrap().id, 2);
    }

    #[test]
    fn test_get_unknown_tax_returns_error() {
        let loader = create_in_memory_loader(CalculatorSettings::default());

        match loader.get_tax(Some(42)) {
            Err(EngineError::TaxNotFound { id }) => assert_eq!(id, 42),
            other => panic!("Expected TaxNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_tax_without_default_returns_error() {
        let loader = create_in_memory_loader(CalculatorSettings::default());
        assert!(matches!(loader.get_tax(None), Err(EngineError::NoDefaultTax)));
    }

    #[test]
    fn test_explicit_id_overrides_default() {
        let loader = create_in_memory_loader(CalculatorSettings {
            default_tax_id: Some(1),
            default_ss_id: Some(1),
            ..CalculatorSettings::default()
        });
        assert_eq!(loader.get_tax(Some(2)).unwrap().id, 2);
        assert_eq!(loader.get_social_security(Some(2)).unwrap().id, 2);
    }

    #[test]
    fn test_get_social_security_without_default_returns_error() {
        let loader = create_in_memory_loader(CalculatorSettings::default());
        assert!(matches!(
            loader.get_social_security(None),
            Err(EngineError::NoDefaultSocialSecurity)
        ));
        assert!(matches!(
            loader.get_social_security(Some(9)),
            Err(EngineError::SocialSecurityNotFound { id: 9 })
        ));
    }

    #[test]
    fn test_tax_rounder_prefers_definition_policy() {
        let loader = create_in_memory_loader(CalculatorSettings::default());

        let rounder = loader.tax_rounder(loader.get_tax(Some(1)).unwrap()).unwrap();
        assert_eq!(rounder.method(), RoundingMethod::Ceiling);
        assert_eq!(rounder.to_nearest(), dec("100"));

        let rounder = loader.tax_rounder(loader.get_tax(Some(2)).unwrap()).unwrap();
        assert_eq!(rounder.method(), RoundingMethod::Floor);
        assert_eq!(rounder.to_nearest(), dec("1000"));
    }

    #[test]
    fn test_calculate_without_ss_salary_skips_social_security_lookup() {
        // No default social security is configured; the lookup must not run.
        let loader = create_in_memory_loader(CalculatorSettings {
            default_tax_id: Some(1),
            ..CalculatorSettings::default()
        });
        let request = GrossRequest::new(dec("1000000"));

        let breakdown = loader.calculate(&request, None, None).unwrap();
        assert_eq!(breakdown.deduction.taxes.brackets, dec("100000"));
        assert_eq!(breakdown.deduction.social_security, Decimal::ZERO);
    }

    #[test]
    fn test_calculate_with_ss_salary_and_no_default_fails() {
        let loader = create_in_memory_loader(CalculatorSettings {
            default_tax_id: Some(1),
            ..CalculatorSettings::default()
        });
        let request = GrossRequest::new(dec("1000000")).with_ss_salary(dec("1000000"));

        assert!(matches!(
            loader.calculate(&request, None, None),
            Err(EngineError::NoDefaultSocialSecurity)
        ));
    }

    #[test]
    fn test_calculate_uses_selected_definitions() {
        let loader = create_in_memory_loader(CalculatorSettings::default());
        let request = GrossRequest::new(dec("1000000"))
            .with_compensation(dec("100000"))
            .with_ss_salary(dec("1000000"));

        // base 930000 * 0.1 = 93000, floor to 1000; fixed 5000
        let breakdown = loader.calculate(&request, Some(2), Some(1)).unwrap();
        assert_eq!(breakdown.deduction.social_security, dec("70000"));
        assert_eq!(breakdown.deduction.taxes.brackets, dec("93000"));
        assert_eq!(breakdown.deduction.taxes.fixed, dec("5000"));
        assert_eq!(breakdown.net, dec("932000"));
    }

    #[test]
    fn test_calculate_propagates_invalid_amount() {
        let loader = create_in_memory_loader(CalculatorSettings::default());
        let request = GrossRequest::new(Decimal::ZERO);

        assert!(matches!(
            loader.calculate(&request, Some(1), None),
            Err(EngineError::InvalidAmount { .. })
        ));
    }
}
