//! Session struct, initialization, and turn submission.

use std::sync::Arc;

use cantochat_common::{Notification, NotificationQueue, SessionId};
use tracing::{debug, info, warn};

use crate::backend::InitBackend;
use crate::connection::{Connection, ConnectionState};
use crate::conversation::Conversation;
use crate::protocol::ChatRequest;
use crate::transport::ChatTransport;
use crate::{SessionError, TransportError, INIT_FAILURE_TEXT};

use super::types::{SessionOptions, SubmitOutcome};

/// One scenario's conversation plus its single connection slot.
///
/// All mutating methods take `&mut self`, so a session processes one
/// operation at a time. Submitting while a previous reply is still
/// streaming closes that connection before the new one opens.
pub struct SessionController {
    /// Regenerated on every `initialize`.
    pub(super) id: SessionId,
    pub(super) scenario_id: String,
    pub(super) instruction: String,
    pub(super) conversation: Conversation,
    /// At most one live connection per session.
    pub(super) connection: Option<Connection>,
    pub(super) transport: Arc<dyn ChatTransport>,
    pub(super) backend: Arc<dyn InitBackend>,
    pub(super) notifications: NotificationQueue,
    pub(super) options: SessionOptions,
}

impl SessionController {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        backend: Arc<dyn InitBackend>,
        options: SessionOptions,
    ) -> Self {
        Self {
            id: SessionId::new(),
            scenario_id: String::new(),
            instruction: String::new(),
            conversation: Conversation::new(),
            connection: None,
            transport,
            backend,
            notifications: NotificationQueue::new(options.notification_capacity),
            options,
        }
    }

    /// Enter a scenario: tear down any live connection, then replace the
    /// conversation with the backend's opening line.
    ///
    /// On failure the conversation holds a single placeholder turn, an
    /// error notification is queued, and the error is returned.
    pub async fn initialize(
        &mut self,
        scenario_id: &str,
        instruction: &str,
    ) -> Result<(), SessionError> {
        if scenario_id.trim().is_empty() || instruction.trim().is_empty() {
            return Err(SessionError::InvalidScenario);
        }

        self.close();
        self.id = SessionId::new();
        self.scenario_id = scenario_id.trim().to_string();
        self.instruction = instruction.to_string();
        info!(session = %self.id.short(), scenario = %self.scenario_id, "Initializing scenario");

        let backend = Arc::clone(&self.backend);
        let result =
            match tokio::time::timeout(self.options.init_timeout, backend.init(instruction)).await
            {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout),
            };

        match result {
            Ok(opening) => {
                debug!(session = %self.id.short(), chars = opening.chars().count(), "Opening line received");
                self.conversation.reset_with_assistant(opening);
                Ok(())
            }
            Err(e) => {
                warn!(session = %self.id.short(), error = %e, "Initialization failed");
                self.conversation.reset_with_assistant(INIT_FAILURE_TEXT);
                let err = SessionError::Initialization(e);
                self.notify(&err);
                Err(err)
            }
        }
    }

    /// Record a user turn and open a connection for it.
    ///
    /// Blank input is ignored. The history sent with the turn is every
    /// closed turn before this one; a partially streamed reply that is
    /// still open is left out.
    pub fn submit_turn(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let message = text.trim();
        if message.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }
        if self.scenario_id.is_empty() {
            return Err(SessionError::NotInitialized);
        }

        let history = self.conversation.closed_history();
        self.conversation.push_user(message);
        self.close();

        let request = ChatRequest::new(self.scenario_id.as_str(), message, &history);
        let connection = self.transport.open(request);
        info!(
            session = %self.id.short(),
            connection = connection.id(),
            history = history.len(),
            "Submitted turn"
        );
        self.connection = Some(connection);
        Ok(SubmitOutcome::Sent)
    }

    /// Close the live connection, if any. Does not wait for the transport
    /// task to wind down.
    pub fn close(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            debug!(session = %self.id.short(), connection = connection.id(), "Closing connection");
            connection.close();
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn has_live_connection(&self) -> bool {
        self.connection.as_ref().is_some_and(Connection::is_live)
    }

    pub fn connection_state(&self) -> Option<ConnectionState> {
        self.connection.as_ref().map(Connection::state)
    }

    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub(super) fn notify(&mut self, err: &SessionError) {
        self.notifications
            .push(Notification::error(err.notice_title(), err.notice_body()));
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.close();
    }
}
