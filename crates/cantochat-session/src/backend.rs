//! Backend client for the liveness probe and the opening-line request.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::protocol::{HealthReply, InitReply, InitRequest};
use crate::TransportError;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of a scenario's opening line.
#[async_trait]
pub trait InitBackend: Send + Sync {
    /// Send the system instruction and return the assistant's first line.
    async fn init(&self, prompt: &str) -> Result<String, TransportError>;
}

/// Result of probing `/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Ok {
        version: Option<String>,
        server_time: Option<NaiveDateTime>,
    },
    Unreachable(String),
}

impl Health {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// HTTP client for the backend's `/health` and `/init` endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// The init deadline is enforced by the session controller, so the
    /// client itself only bounds the TCP connect.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend. Never fails; problems are folded into
    /// [`Health::Unreachable`].
    pub async fn health(&self) -> Health {
        let url = format!("{}/health", self.base_url);
        let response = match self.http.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(r) => r,
            Err(e) => return Health::Unreachable(TransportError::from(e).to_string()),
        };

        let status = response.status();
        let body = match response.json::<HealthReply>().await {
            Ok(body) => body,
            Err(e) => return Health::Unreachable(format!("HTTP {status}: {e}")),
        };
        if !status.is_success() || body.status != "ok" {
            return Health::Unreachable(format!("HTTP {status}: status {}", body.status));
        }

        Health::Ok {
            version: body.version,
            server_time: body.timestamp.and_then(|t| t.parse().ok()),
        }
    }
}

#[async_trait]
impl InitBackend for BackendClient {
    async fn init(&self, prompt: &str) -> Result<String, TransportError> {
        let url = format!("{}/init", self.base_url);
        debug!(url = %url, "Init request");

        let response = self
            .http
            .post(&url)
            .json(&InitRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), &text));
        }

        let reply: InitReply = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        reply
            .response
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| TransportError::Parse("missing `response` in init reply".into()))
    }
}
