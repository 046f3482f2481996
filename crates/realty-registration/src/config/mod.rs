use std::env;
use std::time::Duration;

use crate::registration::constants::NAME_MIN_LENGTH;
use crate::registration::{DocumentKind, FormValidator, RuleConfig, RuleTables};

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the registration tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub registration: RegistrationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            registration: RegistrationConfig::from_env()?,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Business switches for validation and account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub rules: RuleConfig,
    pub enforce_checksums: bool,
    pub require_terms: bool,
    pub live_debounce: Duration,
    /// Shortest accepted name, in characters.
    pub name_min_length: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfig::default(),
            enforce_checksums: true,
            require_terms: true,
            live_debounce: Duration::from_millis(500),
            name_min_length: NAME_MIN_LENGTH,
        }
    }
}

impl RegistrationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let rules = RuleConfig {
            broker_document: document_var("REGISTRATION_BROKER_DOCUMENT")?,
            administrator_document: document_var("REGISTRATION_ADMIN_DOCUMENT")?,
        };
        let enforce_checksums =
            flag_var("REGISTRATION_ENFORCE_CHECKSUMS", defaults.enforce_checksums)?;
        let require_terms = flag_var("REGISTRATION_REQUIRE_TERMS", defaults.require_terms)?;
        let live_debounce = match env::var("REGISTRATION_LIVE_DEBOUNCE_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| invalid("REGISTRATION_LIVE_DEBOUNCE_MS", &value))?,
            Err(_) => defaults.live_debounce,
        };
        let name_min_length = match env::var("REGISTRATION_NAME_MIN_LENGTH") {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(length) if length > 0 => length,
                _ => return Err(invalid("REGISTRATION_NAME_MIN_LENGTH", &value)),
            },
            Err(_) => defaults.name_min_length,
        };

        Ok(Self {
            rules,
            enforce_checksums,
            require_terms,
            live_debounce,
            name_min_length,
        })
    }

    pub fn validator(&self) -> FormValidator {
        FormValidator::new(RuleTables::new(self.rules)).with_name_min_length(self.name_min_length)
    }
}

fn invalid(variable: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        variable,
        value: value.to_string(),
    }
}

fn document_var(variable: &'static str) -> Result<Option<DocumentKind>, ConfigError> {
    let Ok(value) = env::var(variable) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" => Ok(None),
        "cpf" => Ok(Some(DocumentKind::Cpf)),
        "cnpj" => Ok(Some(DocumentKind::Cnpj)),
        _ => Err(invalid(variable, &value)),
    }
}

fn flag_var(variable: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(variable) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(variable, &value)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} has an invalid value '{value}'")]
    InvalidValue {
        variable: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "REGISTRATION_BROKER_DOCUMENT",
            "REGISTRATION_ADMIN_DOCUMENT",
            "REGISTRATION_ENFORCE_CHECKSUMS",
            "REGISTRATION_REQUIRE_TERMS",
            "REGISTRATION_LIVE_DEBOUNCE_MS",
            "REGISTRATION_NAME_MIN_LENGTH",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.registration, RegistrationConfig::default());
    }

    #[test]
    fn document_requirements_are_configurable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("REGISTRATION_ADMIN_DOCUMENT", "CPF");
        env::set_var("REGISTRATION_ENFORCE_CHECKSUMS", "off");
        env::set_var("REGISTRATION_LIVE_DEBOUNCE_MS", "250");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.registration.rules.administrator_document,
            Some(DocumentKind::Cpf)
        );
        assert_eq!(config.registration.rules.broker_document, None);
        assert!(!config.registration.enforce_checksums);
        assert_eq!(config.registration.live_debounce, Duration::from_millis(250));
    }

    #[test]
    fn rejects_unknown_document_kind() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REGISTRATION_BROKER_DOCUMENT", "rg");

        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidValue { variable, value }) => {
                assert_eq!(variable, "REGISTRATION_BROKER_DOCUMENT");
                assert_eq!(value, "rg");
            }
            other => panic!("expected invalid document kind, got {other:?}"),
        }
    }

    #[test]
    fn name_minimum_comes_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REGISTRATION_NAME_MIN_LENGTH", "2");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.registration.name_min_length, 2);
        assert_eq!(config.registration.validator().name_min_length(), 2);
        assert_eq!(
            RegistrationConfig::default().validator().name_min_length(),
            NAME_MIN_LENGTH
        );
    }

    #[test]
    fn rejects_zero_name_minimum() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REGISTRATION_NAME_MIN_LENGTH", "0");

        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidValue { variable, .. }) => {
                assert_eq!(variable, "REGISTRATION_NAME_MIN_LENGTH");
            }
            other => panic!("expected invalid name minimum, got {other:?}"),
        }
    }
}
