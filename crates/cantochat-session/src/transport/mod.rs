//! Chat transports.
//!
//! A transport turns one [`ChatRequest`] into a [`Connection`]. Both
//! variants spawn a tokio task per connection and return immediately, so
//! `open` must be called from within a tokio runtime.

mod http;
mod websocket;


pub use http::HttpTransport;
pub use websocket::WebSocketTransport;

use crate::connection::Connection;
use crate::protocol::ChatRequest;

/// How a transport delivers the assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Many chunks over a persistent socket.
    Streaming,
    /// One reply per request.
    Request,
}

pub trait ChatTransport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Start a chat exchange for `request`. The returned connection is in
    /// the `Opening` state; progress arrives as events on it.
    fn open(&self, request: ChatRequest) -> Connection;
}
