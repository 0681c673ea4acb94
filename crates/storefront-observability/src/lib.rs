//! Observability for the storefront tools.
//!
//! This crate provides:
//! - `RequestId` - Correlation id for one command or request
//! - `command_span` - Root `tracing` span carrying the request context
//! - `init` - `tracing` subscriber setup honoring `RUST_LOG`

mod request_id;
mod span;
mod subscriber;

pub use request_id::RequestId;
pub use span::command_span;
pub use subscriber::{default_directive, init, span_events, LogFormat};
