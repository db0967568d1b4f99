//! Validation for backend endpoints and timeouts.

use crate::schema::CantochatConfig;

use super::helpers::{validate_range, validate_url};

/// Validate backend URLs and timeout ranges.
pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &CantochatConfig) {
    let backend = &config.backend;
    validate_url(errors, "backend.base_url", &backend.base_url, &["http", "https"]);
    validate_url(errors, "backend.ws_url", &backend.ws_url, &["ws", "wss"]);
    validate_range(
        errors,
        "backend.connect_timeout_secs",
        backend.connect_timeout_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "backend.init_timeout_secs",
        backend.init_timeout_secs,
        5,
        300,
    );
    validate_range(
        errors,
        "backend.chat_timeout_secs",
        backend.chat_timeout_secs,
        5,
        600,
    );
}
