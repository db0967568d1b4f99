//! Scenario entries selectable by id from the command line.

use serde::{Deserialize, Serialize};

/// A role-play scenario: identifier sent to the backend, display title,
/// and the system instruction used to request the opening line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ScenarioSpec {
    pub id: String,
    pub title: String,
    pub prompt: String,
}
