//! Mock server configuration
//!
//! Configuration can be built in code, read from `MOCK_*` environment
//! variables, or parsed from YAML. Model and factory registration is not
//! part of this; it happens through [`crate::server::MockServerBuilder`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Environment the mock server runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[serde(alias = "test")]
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid_value(
                "environment",
                s,
                "development, testing, or production",
            )),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

impl Environment {
    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }
}

/// Mock server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub environment: Environment,
    /// Forward advisory warnings to `tracing` instead of dropping them
    pub log_warnings: bool,
    /// Extra nouns whose singular and plural forms are the same
    pub uncountable: Vec<String>,
    /// Extra irregular nouns, singular -> plural
    pub irregular: BTreeMap<String, String>,
    /// Suffix appended to a belongsTo name to derive its foreign key
    pub foreign_key_suffix: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Testing,
            log_warnings: false,
            uncountable: Vec::new(),
            irregular: BTreeMap::new(),
            foreign_key_suffix: "Id".to_string(),
        }
    }
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Development configuration: warnings go to the log
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            log_warnings: true,
            ..Self::default()
        }
    }

    /// Mark a noun as uncountable
    pub fn with_uncountable(mut self, word: impl Into<String>) -> Self {
        self.uncountable.push(word.into());
        self
    }

    /// Register an irregular singular/plural pair
    pub fn with_irregular(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.irregular.insert(singular.into(), plural.into());
        self
    }

    /// Load configuration from `MOCK_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(env_str) = env::var("MOCK_ENVIRONMENT") {
            config.environment = env_str.parse()?;
        }

        if let Ok(flag) = env::var("MOCK_LOG_WARNINGS") {
            config.log_warnings = flag.parse().map_err(|_| {
                ConfigError::invalid_value("log_warnings", flag.as_str(), "true or false")
            })?;
        } else {
            config.log_warnings = !config.environment.is_testing();
        }

        if let Ok(words) = env::var("MOCK_UNCOUNTABLE") {
            config.uncountable = split_list(&words).map(str::to_string).collect();
        }

        if let Ok(pairs) = env::var("MOCK_IRREGULAR") {
            for pair in split_list(&pairs) {
                let (singular, plural) = pair.split_once(':').ok_or_else(|| {
                    ConfigError::invalid_value("irregular", pair, "singular:plural")
                })?;
                config
                    .irregular
                    .insert(singular.trim().to_string(), plural.trim().to_string());
            }
        }

        if let Ok(suffix) = env::var("MOCK_FOREIGN_KEY_SUFFIX") {
            config.foreign_key_suffix = suffix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.foreign_key_suffix.is_empty() {
            return Err(ConfigError::invalid_value(
                "foreign_key_suffix",
                "",
                "a non-empty suffix such as \"Id\"",
            ));
        }

        if let Some(word) = self.uncountable.iter().find(|w| w.trim().is_empty()) {
            return Err(ConfigError::invalid_value("uncountable", word.as_str(), "a non-empty noun"));
        }

        for (singular, plural) in &self.irregular {
            if singular.trim().is_empty() || plural.trim().is_empty() {
                return Err(ConfigError::validation_failed(format!(
                    "irregular pair '{}' -> '{}' has an empty side",
                    singular, plural
                )));
            }
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
