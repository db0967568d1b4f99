//! Chat session engine for cantochat.
//!
//! Provides the scenario session controller with:
//! - Turn history with a single open (streaming) assistant turn
//! - One live connection per session, closed before the next opens
//! - WebSocket (chunked) and HTTP (whole reply) chat transports
//! - Backend client for `/health` and `/init`

pub mod backend;
pub mod connection;
pub mod conversation;
pub mod protocol;
pub mod session;
pub mod transport;

#[cfg(test)]
mod test_support;

use std::fmt;

pub use backend::{BackendClient, Health, InitBackend};
pub use connection::{Connection, ConnectionSink, ConnectionState, StreamEvent, StreamWarning};
pub use conversation::{Conversation, Turn};
pub use protocol::{ChatRequest, WireRole, WireTurn};
pub use session::{SessionController, SessionEvent, SessionOptions, SubmitOutcome};
pub use transport::{ChatTransport, HttpTransport, TransportKind, WebSocketTransport};

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// Text placed in the conversation when the opening line cannot be fetched.
pub const INIT_FAILURE_TEXT: &str = "初始化失败，请稍后重试";

/// Failure reported by a transport or the backend client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("timed out")]
    Timeout,
    #[error("HTTP {code}: {detail}")]
    Status { code: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("connection closed")]
    Closed,
}

impl TransportError {
    /// Build a status error, pulling the backend's `error` field out of a
    /// JSON body when there is one.
    pub fn status(code: u16, body: &str) -> Self {
        Self::Status {
            code,
            detail: protocol::error_detail(body),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout => ErrorCategory::Timeout,
            // Gateway timeout from the backend's own upstream call.
            Self::Status { code: 504, .. } => ErrorCategory::Timeout,
            Self::Status { .. } => ErrorCategory::Server,
            Self::Network(_) | Self::Parse(_) | Self::Closed => ErrorCategory::Unknown,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Coarse bucket used to pick the user-facing message for a failed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Server,
    Unknown,
}

impl ErrorCategory {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Timeout => "对话响应超时，请重试",
            Self::Server => "服务暂时不可用",
            Self::Unknown => "未知错误",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Server => f.write_str("server error"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Everything the session controller reports back to its caller.
///
/// None of these leave the conversation in an undefined state; each
/// variant documents what the conversation looks like afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Blank scenario id or instruction. Nothing changed.
    #[error("scenario id and system instruction must not be empty")]
    InvalidScenario,
    /// A turn was submitted before any scenario was entered.
    #[error("no scenario has been initialized")]
    NotInitialized,
    /// Conversation holds only the placeholder turn.
    #[error("initialization failed: {0}")]
    Initialization(TransportError),
    /// Request/response chat failed; the user turn stays, no reply added.
    #[error("submission failed ({category}): {source}")]
    SubmissionTransport {
        category: ErrorCategory,
        source: TransportError,
    },
    /// Request/response chat timed out; the user turn stays, no reply added.
    #[error("submission timed out")]
    SubmissionTimeout,
    /// Streaming connection failed; partial assistant text stays, closed.
    #[error("stream error: {0}")]
    Stream(TransportError),
}

impl SessionError {
    pub fn notice_title(&self) -> &'static str {
        match self {
            Self::InvalidScenario | Self::NotInitialized => "无法开始对话",
            Self::Initialization(_) => "初始化失败",
            Self::SubmissionTransport { .. } | Self::SubmissionTimeout => "发送失败",
            Self::Stream(_) => "连接错误",
        }
    }

    pub fn notice_body(&self) -> String {
        match self {
            Self::Initialization(e) => format!("初始化失败: {e}"),
            Self::SubmissionTransport { category, .. } => category.message().to_string(),
            Self::SubmissionTimeout => ErrorCategory::Timeout.message().to_string(),
            Self::Stream(e) => format!("Socket错误: {e}"),
            other => other.to_string(),
        }
    }
}
