use crate::core::hooks::TaxIdHooks;
use crate::core::validator::RutValidator;
use crate::domain::model::{DocType, RangePolicy, REGISTRY_MAX_BODY, REGISTRY_MIN_BODY};
use crate::utils::error::{Result, RutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest and largest bodies representable by the 7-8 digit shape.
const SHAPE_MIN_BODY: u32 = 0;
const SHAPE_MAX_BODY: u32 = 99_999_999;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RutConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub rounding: RoundingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicyKind {
    #[default]
    Registry,
    AnyLength,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub range_policy: Option<RangePolicyKind>,
    pub min_body: Option<u32>,
    pub max_body: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    pub doctypes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundingConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl RutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| RutError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn range_policy(&self) -> RangePolicy {
        match self.validation.range_policy.unwrap_or_default() {
            RangePolicyKind::AnyLength => RangePolicy::AnyLength,
            RangePolicyKind::Registry => RangePolicy::Registry {
                min: self.validation.min_body.unwrap_or(REGISTRY_MIN_BODY),
                max: self.validation.max_body.unwrap_or(REGISTRY_MAX_BODY),
            },
        }
    }

    pub fn validator(&self) -> RutValidator {
        RutValidator::new(self.range_policy())
    }

    /// Enabled doctypes; all of them when the list is absent.
    pub fn doctypes(&self) -> Result<Vec<DocType>> {
        match &self.hooks.doctypes {
            None => Ok(DocType::ALL.to_vec()),
            Some(names) => names.iter().map(|n| n.parse()).collect(),
        }
    }

    pub fn hooks(&self) -> Result<TaxIdHooks> {
        Ok(TaxIdHooks::new(self.validator(), self.doctypes()?))
    }

    /// Configured level, lowercased; `info` when unset.
    pub fn log_level(&self) -> String {
        self.logging
            .level
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_else(|| "info".to_string())
    }

    /// `--verbose` forces `debug` regardless of the configured level.
    pub fn effective_log_level(&self, verbose: bool) -> String {
        if verbose {
            "debug".to_string()
        } else {
            self.log_level()
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn rounding_enabled(&self) -> bool {
        self.rounding.enabled.unwrap_or(true)
    }

    pub fn validate_config(&self) -> Result<()> {
        if let RangePolicy::Registry { min, max } = self.range_policy() {
            validation::validate_range("validation.min_body", min, SHAPE_MIN_BODY, SHAPE_MAX_BODY)?;
            validation::validate_range("validation.max_body", max, SHAPE_MIN_BODY, SHAPE_MAX_BODY)?;
            if min > max {
                return Err(RutError::ConfigValidationError {
                    field: "validation".to_string(),
                    message: format!("min_body ({}) is greater than max_body ({})", min, max),
                });
            }
        }

        if let Some(doctypes) = &self.hooks.doctypes {
            let known: Vec<&str> = DocType::ALL.iter().map(DocType::as_str).collect();
            validation::validate_allowed_values("hooks.doctypes", doctypes, &known)?;
        }

        if let Some(level) = &self.logging.level {
            validation::validate_non_empty_string("logging.level", level)?;
            validation::validate_allowed_values(
                "logging.level",
                std::slice::from_ref(&self.log_level()),
                &LOG_LEVELS,
            )?;
        }

        Ok(())
    }
}

impl Validate for RutConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RutConfig::from_toml_str("").unwrap();
        assert_eq!(config.range_policy(), RangePolicy::default());
        assert_eq!(config.doctypes().unwrap(), DocType::ALL.to_vec());
        assert_eq!(config.log_level(), "info");
        assert!(config.rounding_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[validation]
range_policy = "registry"
min_body = 1000000
max_body = 30000000

[hooks]
doctypes = ["Customer", "Supplier"]

[rounding]
enabled = false

[logging]
level = "debug"
json = true
"#;

        let config = RutConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.range_policy(),
            RangePolicy::Registry {
                min: 1_000_000,
                max: 30_000_000
            }
        );
        assert_eq!(
            config.doctypes().unwrap(),
            vec![DocType::Customer, DocType::Supplier]
        );
        assert!(!config.rounding_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
        assert!(config.validator().is_valid("25.000.001-4"));
    }

    #[test]
    fn test_log_level_is_normalized_and_overridden_by_verbose() {
        let config = RutConfig::from_toml_str("[logging]\nlevel = \"DEBUG\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level(), "debug");

        let config = RutConfig::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.effective_log_level(false), "warn");
        assert_eq!(config.effective_log_level(true), "debug");
        assert_eq!(
            crate::utils::logger::filter_directive(&config.effective_log_level(false)),
            "chile_rut=warn"
        );
    }

    #[test]
    fn test_any_length_policy() {
        let config = RutConfig::from_toml_str("[validation]\nrange_policy = \"any_length\"\n").unwrap();
        assert_eq!(config.range_policy(), RangePolicy::AnyLength);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CHILE_RUT_TEST_MAX_BODY", "26000000");

        let toml_content = r#"
[validation]
max_body = ${CHILE_RUT_TEST_MAX_BODY}
"#;

        let config = RutConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.validation.max_body, Some(26_000_000));

        std::env::remove_var("CHILE_RUT_TEST_MAX_BODY");
    }

    #[test]
    fn test_config_validation() {
        let inverted = RutConfig::from_toml_str("[validation]\nmin_body = 20000000\nmax_body = 1000000\n").unwrap();
        assert!(inverted.validate().is_err());

        let unknown_doctype = RutConfig::from_toml_str("[hooks]\ndoctypes = [\"Employee\"]\n").unwrap();
        assert!(unknown_doctype.validate().is_err());

        let bad_level = RutConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let too_large = RutConfig::from_toml_str("[validation]\nmax_body = 123456789\n").unwrap();
        assert!(too_large.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[hooks]\ndoctypes = [\"Company\"]\n")
            .unwrap();

        let config = RutConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.doctypes().unwrap(), vec![DocType::Company]);
        assert!(config.hooks().unwrap().handles(DocType::Company));
    }
}
