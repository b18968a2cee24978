use std::env;
use std::fmt;

use crate::shelter::{EligibilityConfig, SelectionStrategy};

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub shelter: ShelterConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let selection = match env::var("SHELTER_SELECTION") {
            Ok(raw) => SelectionStrategy::parse(&raw).ok_or(ConfigError::InvalidSelection(raw))?,
            Err(_) => SelectionStrategy::default(),
        };

        let seed = env::var("SHELTER_SEED")
            .ok()
            .map(|raw| raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw)))
            .transpose()?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            shelter: ShelterConfig {
                selection,
                seed,
                eligibility: EligibilityConfig::default(),
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for a shelter instance: how adoption candidates are drawn, the optional seed
/// shared by the random sources, and the eligibility thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelterConfig {
    pub selection: SelectionStrategy,
    pub seed: Option<u64>,
    pub eligibility: EligibilityConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSelection(String),
    InvalidSeed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSelection(value) => write!(
                f,
                "SHELTER_SELECTION must be 'random' or 'lowest_id' (found '{value}')"
            ),
            ConfigError::InvalidSeed(value) => {
                write!(f, "SHELTER_SEED must be a valid u64 (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SHELTER_SELECTION");
        env::remove_var("SHELTER_SEED");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.shelter.selection, SelectionStrategy::Random);
        assert_eq!(config.shelter.seed, None);
        assert_eq!(config.shelter.eligibility.adoption_quota, 3);
    }

    #[test]
    fn reads_selection_and_seed_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("SHELTER_SELECTION", "Lowest_Id");
        env::set_var("SHELTER_SEED", " 42 ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.shelter.selection, SelectionStrategy::LowestId);
        assert_eq!(config.shelter.seed, Some(42));
        reset_env();
    }

    #[test]
    fn rejects_invalid_seed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SHELTER_SEED", "forty-two");
        let result = AppConfig::load();
        reset_env();
        match result {
            Err(ConfigError::InvalidSeed(value)) => assert_eq!(value, "forty-two"),
            other => panic!("expected invalid seed error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_selection_strategy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SHELTER_SELECTION", "oldest");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidSelection(_))));
    }
}
