use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of deployment.
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

/// Top-level configuration for the triage tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub triage: TriageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let department = env::var("TRIAGE_DEPARTMENT").unwrap_or_else(|_| "emergency".to_string());
        let department = department.trim();
        if department.is_empty() {
            return Err(ConfigError::BlankDepartment);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            triage: TriageConfig {
                department: department.to_string(),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Context the queue instance belongs to.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub department: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    BlankDepartment,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BlankDepartment => {
                write!(f, "TRIAGE_DEPARTMENT must not be blank when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
