use crate::config::ConfigError;
use crate::registration::{ImportError, RegistrationError};
use crate::telemetry::TelemetryError;

/// Failures surfaced to the command-line front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("import error: {0}")]
    Import(#[from] ImportError),
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),
}
