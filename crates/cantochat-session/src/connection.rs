//! A transient chat channel bound to one user turn.
//!
//! Transports create a `Connection` / `ConnectionSink` pair: the session
//! keeps the `Connection` and reads events from it, the transport's
//! background task writes events into the sink and watches for a close
//! request. Closing never waits for the task to finish.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::TransportError;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a connection. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Opening,
    Open,
    Receiving,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamWarning {
    /// The backend cut the reply at its length limit.
    ReplyTruncated,
}

/// Events a transport task reports, in the order it observed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Opened,
    Chunk(String),
    Warning(StreamWarning),
    Completed,
    Failed(TransportError),
}

/// Session-side end of a connection.
#[derive(Debug)]
pub struct Connection {
    id: u64,
    state: ConnectionState,
    events: mpsc::Receiver<StreamEvent>,
    cancel: CancellationToken,
}

/// Transport-side end of a connection.
#[derive(Debug, Clone)]
pub struct ConnectionSink {
    id: u64,
    events: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
}

impl Connection {
    /// Create a linked pair with room for `buffer` undelivered events.
    pub fn channel(buffer: usize) -> (ConnectionSink, Connection) {
        let id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let cancel = CancellationToken::new();
        let sink = ConnectionSink {
            id,
            events: tx,
            cancel: cancel.clone(),
        };
        let connection = Connection {
            id,
            state: ConnectionState::Opening,
            events: rx,
            cancel,
        };
        (sink, connection)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state != ConnectionState::Closed
    }

    /// Request close. Undelivered events are discarded.
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;
        self.cancel.cancel();
        self.events.close();
    }

    /// Wait for the next event. Returns `None` once closed or when the
    /// transport task has gone away.
    pub(crate) async fn recv(&mut self) -> Option<StreamEvent> {
        if self.state == ConnectionState::Closed {
            return None;
        }
        let event = self.events.recv().await;
        self.state = match &event {
            Some(StreamEvent::Opened) => ConnectionState::Open,
            Some(StreamEvent::Chunk(_)) => ConnectionState::Receiving,
            Some(StreamEvent::Warning(_)) => self.state,
            Some(StreamEvent::Completed) | Some(StreamEvent::Failed(_)) | None => {
                ConnectionState::Closed
            }
        };
        event
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl ConnectionSink {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deliver an event. Returns `false` once the session side is gone.
    pub async fn send(&self, event: StreamEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.events.send(event).await.is_ok()
    }

    /// Whether the session has closed or dropped this connection.
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.events.is_closed()
    }

    /// Resolves once the session asks for the connection to close.
    pub async fn closed(&self) {
        self.cancel.cancelled().await
    }
}
