//! Scenario session management.
//!
//! A `SessionController` owns one scenario's conversation and at most one
//! live connection. It fetches the opening line, submits user turns
//! through a pluggable transport, and folds streamed chunks into the
//! trailing assistant turn.

mod controller;
mod pump;
mod types;


pub use controller::SessionController;
pub use types::{SessionEvent, SessionOptions, SubmitOutcome};
