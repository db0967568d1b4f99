//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod backend;
mod helpers;
mod misc;


use crate::schema::CantochatConfig;
use cantochat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CantochatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    backend::validate_backend(&mut errors, config);
    misc::validate_session(&mut errors, config);
    misc::validate_scenarios(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
