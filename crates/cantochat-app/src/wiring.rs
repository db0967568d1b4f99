//! Builds a session controller from config and command-line overrides.

use std::sync::Arc;
use std::time::Duration;

use cantochat_common::CantochatError;
use cantochat_config::{CantochatConfig, TransportVariant};
use cantochat_session::{
    BackendClient, ChatTransport, HttpTransport, SessionController, SessionOptions,
    TransportError, WebSocketTransport,
};

use crate::cli::Args;

/// The scenario a run starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: String,
    pub prompt: String,
}

/// Pick the scenario id and its system instruction.
///
/// The id comes from `--scenario`, else the first configured scenario.
/// The instruction comes from `--prompt`, else the configured scenario
/// with that id.
pub fn resolve_scenario(args: &Args, config: &CantochatConfig) -> Result<Scenario, CantochatError> {
    let id = match (&args.scenario, config.scenarios.first()) {
        (Some(id), _) => id.trim().to_string(),
        (None, Some(first)) => first.id.clone(),
        (None, None) => {
            return Err(CantochatError::Scenario(
                "no scenario given; pass --scenario or add [[scenarios]] to the config".into(),
            ))
        }
    };
    if id.is_empty() {
        return Err(CantochatError::Scenario("scenario id must not be empty".into()));
    }

    let prompt = match &args.prompt {
        Some(prompt) => prompt.clone(),
        None => config
            .scenario(&id)
            .map(|s| s.prompt.clone())
            .ok_or_else(|| {
                CantochatError::Scenario(format!(
                    "scenario '{id}' is not configured; pass --prompt to supply its instruction"
                ))
            })?,
    };
    if prompt.trim().is_empty() {
        return Err(CantochatError::Scenario(format!(
            "scenario '{id}' has an empty instruction"
        )));
    }

    Ok(Scenario { id, prompt })
}

pub fn backend_client(config: &CantochatConfig) -> Result<BackendClient, CantochatError> {
    let connect_timeout = secs(config.backend.connect_timeout_secs);
    BackendClient::new(&config.backend.base_url, connect_timeout).map_err(transport_error)
}

/// Chat transport for `variant`, wired to the configured endpoints.
pub fn chat_transport(
    config: &CantochatConfig,
    variant: TransportVariant,
) -> Result<Arc<dyn ChatTransport>, CantochatError> {
    let backend = &config.backend;
    let buffer = config.session.event_buffer as usize;
    Ok(match variant {
        TransportVariant::Websocket => Arc::new(WebSocketTransport::new(&backend.ws_url, buffer)),
        TransportVariant::Http => Arc::new(
            HttpTransport::new(
                &backend.base_url,
                secs(backend.connect_timeout_secs),
                secs(backend.chat_timeout_secs),
                buffer,
            )
            .map_err(transport_error)?,
        ),
    })
}

pub fn session_options(config: &CantochatConfig) -> SessionOptions {
    SessionOptions {
        init_timeout: secs(config.backend.init_timeout_secs),
        notification_capacity: config.session.notification_capacity as usize,
    }
}

pub fn controller(
    config: &CantochatConfig,
    transport: Arc<dyn ChatTransport>,
    backend: BackendClient,
) -> SessionController {
    SessionController::new(transport, Arc::new(backend), session_options(config))
}

fn secs(value: u32) -> Duration {
    Duration::from_secs(u64::from(value))
}

fn transport_error(e: TransportError) -> CantochatError {
    CantochatError::Session(format!("failed to build HTTP client: {e}"))
}
