//! signpost-core - Core types for the signpost sign-message client.
//!
//! This crate holds the transport-independent heart of the client: the
//! [`SessionClient`] that owns the bearer credential and classifies call
//! failures, the [`Flow`] state machine that sequences the login, message,
//! and result phases, and the error taxonomy shared by every transport
//! implementation.

pub mod error;
pub mod flow;
pub mod session;
pub mod token;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind};
pub use flow::{Flow, FlowEvent, FlowState};
pub use session::SessionClient;
pub use token::Token;
pub use traits::{SignInfo, SignService};
pub use types::ServiceUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
