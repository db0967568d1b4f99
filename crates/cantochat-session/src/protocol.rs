//! JSON shapes exchanged with the chat backend.

use serde::{Deserialize, Serialize};

use crate::conversation::Turn;
use crate::Role;

/// `warning` value the backend sets when the model hit its length limit.
pub const REPLY_TRUNCATED: &str = "reply_truncated";

/// History entry as the backend reads it: `{ "type": "user" | "bot", "text": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTurn {
    pub text: String,
    #[serde(rename = "type")]
    pub role: WireRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    User,
    Bot,
}

impl From<&Turn> for WireTurn {
    fn from(turn: &Turn) -> Self {
        Self {
            text: turn.text().to_string(),
            role: match turn.role() {
                Role::User => WireRole::User,
                Role::Assistant => WireRole::Bot,
            },
        }
    }
}

/// The single message sent for a chat turn, over either transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub scenario: String,
    pub message: String,
    pub history: Vec<WireTurn>,
}

impl ChatRequest {
    pub fn new(scenario: impl Into<String>, message: impl Into<String>, history: &[Turn]) -> Self {
        Self {
            scenario: scenario.into(),
            message: message.into(),
            history: history.iter().map(WireTurn::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InitRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InitReply {
    pub response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    pub response: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthReply {
    pub status: String,
    pub version: Option<String>,
    pub timestamp: Option<String>,
}

/// Human-readable detail from an error body: the `error` field of a JSON
/// object if present, otherwise the first 200 characters of the body.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    body.trim().chars().take(200).collect()
}
