//! Configuration schema types for cantochat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod logging;
mod scenario;
mod session;

pub use backend::*;
pub use logging::*;
pub use scenario::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CantochatConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub scenarios: Vec<ScenarioSpec>,
}

impl CantochatConfig {
    /// Look up a configured scenario by id.
    pub fn scenario(&self, id: &str) -> Option<&ScenarioSpec> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}
