//! Configuration types for the salary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`CalculatorConfig`] built from them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{RoundingPolicy, SocialSecurityDefinition, TaxDefinition};

/// Calculator-wide settings from `calculator.yaml`.
///
/// The rounding policies apply to every definition that does not carry its
/// own. The default ids select the definitions used when a calculation does
/// not name one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Rounding for bracket and fixed taxes.
    #[serde(default = "RoundingPolicy::default_tax")]
    pub tax_rounding: RoundingPolicy,
    /// Rounding for social security deductions.
    #[serde(default = "RoundingPolicy::default_social_security")]
    pub ss_rounding: RoundingPolicy,
    /// The tax used when none is requested.
    #[serde(default)]
    pub default_tax_id: Option<u32>,
    /// The social security scheme used when none is requested.
    #[serde(default)]
    pub default_ss_id: Option<u32>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            tax_rounding: RoundingPolicy::default_tax(),
            ss_rounding: RoundingPolicy::default_social_security(),
            default_tax_id: None,
            default_ss_id: None,
        }
    }
}

/// Tax definitions file structure (`taxes.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxesConfig {
    /// All tax definitions.
    pub taxes: Vec<TaxDefinition>,
}

/// Social security definitions file structure (`social_security.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecurityConfig {
    /// All social security definitions.
    pub social_security: Vec<SocialSecurityDefinition>,
}

/// The complete, validated calculator configuration.
///
/// Only constructible through [`CalculatorConfig::new`], which rejects
/// invalid rounding, rates, bracket schedules, duplicate ids and dangling
/// default ids.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    settings: CalculatorSettings,
    taxes: BTreeMap<u32, TaxDefinition>,
    social_security: BTreeMap<u32, SocialSecurityDefinition>,
}

impl CalculatorConfig {
    /// Validates the parts and assembles them into a configuration.
    pub fn new(
        settings: CalculatorSettings,
        taxes: Vec<TaxDefinition>,
        social_security: Vec<SocialSecurityDefinition>,
    ) -> EngineResult<Self> {
        for policy in [settings.tax_rounding, settings.ss_rounding] {
            if policy.to_nearest <= Decimal::ZERO {
                return Err(EngineError::InvalidRoundingGranularity {
                    to_nearest: policy.to_nearest,
                });
            }
        }

        let mut tax_map = BTreeMap::new();
        for tax in taxes {
            tax.validate()?;
            let id = tax.id;
            if tax_map.insert(id, tax).is_some() {
                return Err(EngineError::DuplicateId {
                    kind: "tax".to_string(),
                    id,
                });
            }
        }

        let mut ss_map = BTreeMap::new();
        for definition in social_security {
            definition.validate()?;
            let id = definition.id;
            if ss_map.insert(id, definition).is_some() {
                return Err(EngineError::DuplicateId {
                    kind: "social security".to_string(),
                    id,
                });
            }
        }

        if let Some(id) = settings.default_tax_id.filter(|id| !tax_map.contains_key(id)) {
            return Err(EngineError::TaxNotFound { id });
        }
        if let Some(id) = settings.default_ss_id.filter(|id| !ss_map.contains_key(id)) {
            return Err(EngineError::SocialSecurityNotFound { id });
        }

        Ok(Self {
            settings,
            taxes: tax_map,
            social_security: ss_map,
        })
    }

    /// Returns the calculator-wide settings.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Returns all tax definitions keyed by id.
    pub fn taxes(&self) -> &BTreeMap<u32, TaxDefinition> {
        &self.taxes
    }

    /// Returns all social security definitions keyed by id.
    pub fn social_security(&self) -> &BTreeMap<u32, SocialSecurityDefinition> {
        &self.social_security
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bracket, RoundingMethod};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_tax(id: u32) -> TaxDefinition {
        TaxDefinition {
            id,
            name: format!("tax {}", id),
            min_allowed_salary: Decimal::ZERO,
            fixed_tax_rate: dec("0.05"),
            compensation_rate: dec("0.75"),
            rounding: None,
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

    #[test]
    fn test_settings_defaults() {
        let settings: CalculatorSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, CalculatorSettings::default());
        assert_eq!(settings.tax_rounding.method, RoundingMethod::Ceiling);
        assert_eq!(settings.tax_rounding.to_nearest, dec("100"));
        assert_eq!(settings.ss_rounding.to_nearest, Decimal::ONE);
    }

    #[test]
    fn test_valid_config_is_assembled() {
        let settings = CalculatorSettings {
            default_tax_id: Some(1),
            default_ss_id: Some(1),
            ..CalculatorSettings::default()
        };
        let config = CalculatorConfig::new(
            settings,
            vec![create_test_tax(1), create_test_tax(2)],
            vec![create_test_social_security(1)],
        )
        .unwrap();
        assert_eq!(config.taxes().len(), 2);
        assert_eq!(config.social_security().len(), 1);
        assert_eq!(config.settings().default_tax_id, Some(1));
    }

    #[test]
    fn test_duplicate_tax_id_rejected() {
        let result = CalculatorConfig::new(
            CalculatorSettings::default(),
            vec![create_test_tax(1), create_test_tax(1)],
            vec![],
        );
        match result {
            Err(EngineError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "tax");
                assert_eq!(id, 1);
            }
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_social_security_id_rejected() {
        let result = CalculatorConfig::new(
            CalculatorSettings::default(),
            vec![],
            vec![create_test_social_security(4), create_test_social_security(4)],
        );
        assert!(matches!(result, Err(EngineError::DuplicateId { id: 4, .. })));
    }

    #[test]
    fn test_dangling_default_tax_rejected() {
        let settings = CalculatorSettings {
            default_tax_id: Some(9),
            ..CalculatorSettings::default()
        };
        let result = CalculatorConfig::new(settings, vec![create_test_tax(1)], vec![]);
        assert!(matches!(result, Err(EngineError::TaxNotFound { id: 9 })));
    }

    #[test]
    fn test_dangling_default_social_security_rejected() {
        let settings = CalculatorSettings {
            default_ss_id: Some(2),
            ..CalculatorSettings::default()
        };
        let result = CalculatorConfig::new(settings, vec![], vec![create_test_social_security(1)]);
        assert!(matches!(
            result,
            Err(EngineError::SocialSecurityNotFound { id: 2 })
        ));
    }

    #[test]
    fn test_zero_settings_granularity_rejected() {
        let settings = CalculatorSettings {
            ss_rounding: RoundingPolicy::new(RoundingMethod::Ceiling, Decimal::ZERO),
            ..CalculatorSettings::default()
        };
        let result = CalculatorConfig::new(settings, vec![], vec![]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidRoundingGranularity { .. })
        ));
    }

    #[test]
    fn test_invalid_tax_definition_rejected() {
        let mut tax = create_test_tax(1);
        tax.brackets.clear();
        let result = CalculatorConfig::new(CalculatorSettings::default(), vec![tax], vec![]);
        assert!(matches!(result, Err(EngineError::InvalidBrackets { .. })));
    }
}
