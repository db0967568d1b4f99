//! Reading a config file into the schema.

use std::io::ErrorKind;
use std::path::Path;

use cantochat_common::ConfigError;
use tracing::{debug, info};

use super::paths::{create_default_config, default_config_path};
use crate::schema::CantochatConfig;

/// Parse the TOML file at `path`. Fields it omits take their defaults.
///
/// Values are not range-checked here; see [`crate::validation::validate`].
pub fn load_from_path(path: &Path) -> Result<CantochatConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };

    let config: CantochatConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), scenarios = config.scenarios.len(), "Loaded config");
    Ok(config)
}

/// Load from [`default_config_path`], writing the default template first
/// when no file exists yet.
pub fn load_default() -> Result<CantochatConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "No config file, writing defaults");
            create_default_config(&path)?;
            Ok(CantochatConfig::default())
        }
        other => other,
    }
}
