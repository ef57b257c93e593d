//! Core signpost types.
//!
//! These types enforce invariants at construction time, ensuring invalid
//! states are unrepresentable.

mod service_url;

pub use service_url::ServiceUrl;
