//! Backend endpoint and transport configuration.

use serde::{Deserialize, Serialize};

/// Which wire variant carries chat turns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportVariant {
    /// One WebSocket connection per turn, assistant text arrives in chunks.
    #[default]
    Websocket,
    /// Plain `POST /chat`, the whole reply arrives at once.
    Http,
}

impl std::fmt::Display for TransportVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Websocket => f.write_str("websocket"),
            Self::Http => f.write_str("http"),
        }
    }
}

impl std::str::FromStr for TransportVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "websocket" | "ws" => Ok(Self::Websocket),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown transport '{other}' (expected websocket or http)")),
        }
    }
}

/// Backend endpoints and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL for `/health`, `/init` and `/chat`.
    pub base_url: String,
    /// WebSocket endpoint for streaming chat.
    pub ws_url: String,
    pub transport: TransportVariant,
    /// TCP connect timeout for HTTP calls (valid range: 1-60).
    pub connect_timeout_secs: u32,
    /// Deadline for the opening-line request (valid range: 5-300).
    pub init_timeout_secs: u32,
    /// Request timeout for the HTTP chat variant (valid range: 5-600).
    pub chat_timeout_secs: u32,
    /// Probe `/health` when a session starts.
    pub health_check: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            ws_url: "ws://127.0.0.1:5000/ws/chat".into(),
            transport: TransportVariant::Websocket,
            connect_timeout_secs: 5,
            init_timeout_secs: 70,
            chat_timeout_secs: 120,
            health_check: true,
        }
    }
}
