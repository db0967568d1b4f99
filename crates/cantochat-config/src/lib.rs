//! cantochat configuration.
//!
//! TOML-based configuration with validation. All sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cantochat_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BackendConfig, CantochatConfig, LogLevel, LoggingConfig, ScenarioSpec, SessionConfig,
    TransportVariant, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use cantochat_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default `config.toml` if none exists.
pub fn load_config() -> Result<CantochatConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<CantochatConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &CantochatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = CantochatConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"backend\""));
        assert!(json.contains("\"session\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"scenarios\""));
        assert!(json.contains("\"websocket\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nevent_buffer = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = CantochatConfig::default();
        let json = config_to_json(&config);
        let parsed: CantochatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }
}
