//! Validation for session settings and the scenario list.

use std::collections::HashSet;

use crate::schema::CantochatConfig;

use super::helpers::validate_range;

/// Validate session buffer sizes.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &CantochatConfig) {
    validate_range(
        errors,
        "session.notification_capacity",
        config.session.notification_capacity,
        1,
        256,
    );
    validate_range(
        errors,
        "session.event_buffer",
        config.session.event_buffer,
        1,
        4096,
    );
}

/// Scenario ids must be present and unique; prompts must be non-blank.
pub(crate) fn validate_scenarios(errors: &mut Vec<String>, config: &CantochatConfig) {
    let mut seen = HashSet::new();
    for (i, scenario) in config.scenarios.iter().enumerate() {
        if scenario.id.trim().is_empty() {
            errors.push(format!("scenarios[{i}].id must not be empty"));
        } else if !seen.insert(scenario.id.as_str()) {
            errors.push(format!("scenarios[{i}].id \"{}\" is duplicated", scenario.id));
        }
        if scenario.prompt.trim().is_empty() {
            errors.push(format!("scenarios[{i}].prompt must not be empty"));
        }
    }
}
