//! Shared domain types for the Kantoku webhook probe.
//!
//! Holds the request payload sent to the n8n "Generate Tasks" workflow, the
//! classified probe outcome, run configuration defaults, and the transport
//! error type.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod probe;
