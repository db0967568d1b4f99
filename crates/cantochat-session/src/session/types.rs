//! Session option and event types.

use std::time::Duration;

use crate::connection::StreamWarning;
use crate::SessionError;

/// Controller tuning.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Deadline for the opening-line request.
    pub init_timeout: Duration,
    /// Maximum pending notifications.
    pub notification_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            init_timeout: Duration::from_secs(70),
            notification_capacity: 16,
        }
    }
}

/// Result of `submit_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// User turn recorded and a connection opened for it.
    Sent,
}

/// What happened when one inbound event was applied to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Opened,
    /// Text appended to the trailing assistant turn.
    Chunk(String),
    Warning(StreamWarning),
    /// The assistant turn is closed and the connection retired.
    Completed,
    /// The connection failed and was retired.
    Failed(SessionError),
}
