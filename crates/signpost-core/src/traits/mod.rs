//! Core traits for sign service behavior.

mod service;

pub use service::{SignInfo, SignService};
