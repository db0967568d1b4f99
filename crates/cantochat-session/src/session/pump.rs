//! Applying inbound connection events to the conversation.

use cantochat_common::Notification;
use tracing::{debug, warn};

use crate::connection::{StreamEvent, StreamWarning};
use crate::transport::TransportKind;
use crate::{ErrorCategory, SessionError, TransportError};

use super::controller::SessionController;
use super::types::SessionEvent;

impl SessionController {
    /// Wait for the next event on the live connection and apply it.
    ///
    /// Returns `None` when there is no live connection.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let connection = self.connection.as_mut()?;
        let event = connection.recv().await;
        Some(self.apply(event))
    }

    /// Pump events until the current exchange completes or fails.
    pub async fn finish_turn(&mut self) -> Result<(), SessionError> {
        while let Some(event) = self.next_event().await {
            if let SessionEvent::Failed(err) = event {
                return Err(err);
            }
        }
        Ok(())
    }

    fn apply(&mut self, event: Option<StreamEvent>) -> SessionEvent {
        match event {
            Some(StreamEvent::Opened) => {
                debug!(session = %self.id.short(), "Connection open");
                SessionEvent::Opened
            }
            Some(StreamEvent::Chunk(text)) => {
                self.conversation.append_chunk(&text);
                SessionEvent::Chunk(text)
            }
            Some(StreamEvent::Warning(warning)) => {
                match warning {
                    StreamWarning::ReplyTruncated => self
                        .notifications
                        .push(Notification::warning("回复被截断", "回复因长度限制被截断")),
                }
                SessionEvent::Warning(warning)
            }
            Some(StreamEvent::Completed) | None => {
                debug!(session = %self.id.short(), "Exchange complete");
                self.retire();
                SessionEvent::Completed
            }
            Some(StreamEvent::Failed(e)) => {
                warn!(session = %self.id.short(), error = %e, "Exchange failed");
                self.retire();
                let err = self.classify(e);
                self.notify(&err);
                SessionEvent::Failed(err)
            }
        }
    }

    /// Drop the connection and freeze whatever assistant text arrived.
    fn retire(&mut self) {
        self.close();
        self.conversation.close_trailing();
    }

    fn classify(&self, e: TransportError) -> SessionError {
        match self.transport.kind() {
            TransportKind::Streaming => SessionError::Stream(e),
            TransportKind::Request => match e.category() {
                ErrorCategory::Timeout => SessionError::SubmissionTimeout,
                category => SessionError::SubmissionTransport {
                    category,
                    source: e,
                },
            },
        }
    }
}
