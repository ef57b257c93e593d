//! Command implementations.

pub mod info;
pub mod run;
pub mod send;
