//! Request/response chat over `POST /chat`.

use std::time::Duration;

use tracing::{debug, warn};

use crate::connection::{Connection, ConnectionSink, StreamEvent, StreamWarning};
use crate::protocol::{ChatReply, ChatRequest, REPLY_TRUNCATED};
use crate::TransportError;

use super::{ChatTransport, TransportKind};

/// Delivers the whole reply as one chunk. A truncated reply adds a
/// [`StreamWarning::ReplyTruncated`] event before completion.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    chat_url: String,
    buffer: usize,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
        buffer: usize,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
            buffer,
        })
    }
}

impl ChatTransport for HttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Request
    }

    fn open(&self, request: ChatRequest) -> Connection {
        let (sink, connection) = Connection::channel(self.buffer);
        tokio::spawn(run_request(
            self.http.clone(),
            self.chat_url.clone(),
            request,
            sink,
        ));
        connection
    }
}

async fn run_request(
    http: reqwest::Client,
    url: String,
    request: ChatRequest,
    sink: ConnectionSink,
) {
    let connection = sink.id();
    if !sink.send(StreamEvent::Opened).await {
        return;
    }

    debug!(connection, url = %url, "Chat request");
    let result = tokio::select! {
        _ = sink.closed() => {
            debug!(connection, "Chat request abandoned");
            return;
        }
        result = post_chat(&http, &url, &request) => result,
    };

    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!(connection, error = %e, "Chat request failed");
            sink.send(StreamEvent::Failed(e)).await;
            return;
        }
    };

    let Some(text) = reply.response.filter(|text| !text.trim().is_empty()) else {
        warn!(connection, "Chat reply has no response text");
        sink.send(StreamEvent::Failed(TransportError::Parse(
            "missing `response` in chat reply".into(),
        )))
        .await;
        return;
    };
    if !sink.send(StreamEvent::Chunk(text)).await {
        return;
    }
    if reply.warning.as_deref() == Some(REPLY_TRUNCATED)
        && !sink
            .send(StreamEvent::Warning(StreamWarning::ReplyTruncated))
            .await
    {
        return;
    }
    sink.send(StreamEvent::Completed).await;
}

async fn post_chat(
    http: &reqwest::Client,
    url: &str,
    request: &ChatRequest,
) -> Result<ChatReply, TransportError> {
    let response = http.post(url).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(TransportError::status(status.as_u16(), &text));
    }

    response
        .json::<ChatReply>()
        .await
        .map_err(|e| TransportError::Parse(e.to_string()))
}
