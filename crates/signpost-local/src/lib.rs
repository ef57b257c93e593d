//! signpost-local - In-process sign service implementation.
//!
//! Implements the same [`SignService`](signpost_core::SignService) trait
//! as the network transport, backed by an in-memory token table and a
//! message queue. Intended for development and tests without a running
//! sign service.

mod service;

pub use service::{LocalSignService, QueuedMessage};
