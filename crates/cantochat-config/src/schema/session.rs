//! Per-session controller settings.

use serde::{Deserialize, Serialize};

/// Session controller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum pending notifications per session (valid range: 1-256).
    pub notification_capacity: u32,
    /// Buffered inbound events per connection (valid range: 1-4096).
    pub event_buffer: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notification_capacity: 16,
            event_buffer: 64,
        }
    }
}
