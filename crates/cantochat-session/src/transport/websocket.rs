//! Streaming chat over one WebSocket connection per turn.

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use crate::connection::{Connection, ConnectionSink, StreamEvent};
use crate::protocol::ChatRequest;
use crate::TransportError;

use super::{ChatTransport, TransportKind};

/// Opens a socket, sends the request as a single text frame, then forwards
/// every text frame as a chunk until the server closes.
#[derive(Debug, Clone)]
pub struct WebSocketTransport {
    url: String,
    buffer: usize,
}

impl WebSocketTransport {
    pub fn new(url: impl Into<String>, buffer: usize) -> Self {
        Self {
            url: url.into(),
            buffer,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatTransport for WebSocketTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Streaming
    }

    fn open(&self, request: ChatRequest) -> Connection {
        let (sink, connection) = Connection::channel(self.buffer);
        tokio::spawn(run_socket(self.url.clone(), request, sink));
        connection
    }
}

async fn run_socket(url: String, request: ChatRequest, sink: ConnectionSink) {
    let connection = sink.id();
    let payload = match serde_json::to_string(&request) {
        Ok(p) => p,
        Err(e) => {
            sink.send(StreamEvent::Failed(TransportError::Parse(e.to_string())))
                .await;
            return;
        }
    };

    debug!(connection, url = %url, "Connecting chat socket");
    let connect = tokio::select! {
        _ = sink.closed() => {
            debug!(connection, "Closed before handshake completed");
            return;
        }
        result = tokio_tungstenite::connect_async(url.as_str()) => result,
    };
    let ws_stream = match connect {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            warn!(connection, error = %e, "Chat socket connect failed");
            sink.send(StreamEvent::Failed(TransportError::Network(e.to_string())))
                .await;
            return;
        }
    };

    let (mut ws_write, mut ws_read) = ws_stream.split();
    if !sink.send(StreamEvent::Opened).await {
        let _ = ws_write.send(WsMessage::Close(None)).await;
        return;
    }

    if let Err(e) = ws_write.send(WsMessage::Text(payload.into())).await {
        warn!(connection, error = %e, "Failed to send chat message");
        sink.send(StreamEvent::Failed(TransportError::Network(e.to_string())))
            .await;
        return;
    }
    debug!(connection, "Chat message sent");

    loop {
        let msg = tokio::select! {
            _ = sink.closed() => {
                debug!(connection, "Closing superseded chat socket");
                let _ = ws_write.send(WsMessage::Close(None)).await;
                return;
            }
            msg = ws_read.next() => msg,
        };

        let chunk = match msg {
            Some(Ok(WsMessage::Text(text))) => text.as_str().to_owned(),
            Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(_) => {
                    debug!(connection, len = bytes.len(), "Ignoring non-UTF-8 binary frame");
                    continue;
                }
            },
            Some(Ok(WsMessage::Close(_))) | None => {
                info!(connection, "Chat socket closed by server");
                sink.send(StreamEvent::Completed).await;
                return;
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                warn!(connection, error = %e, "Chat socket error");
                sink.send(StreamEvent::Failed(TransportError::Network(e.to_string())))
                    .await;
                return;
            }
        };

        if chunk.is_empty() {
            continue;
        }
        if !sink.send(StreamEvent::Chunk(chunk)).await {
            let _ = ws_write.send(WsMessage::Close(None)).await;
            return;
        }
    }
}
