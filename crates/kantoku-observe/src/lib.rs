//! Logging setup shared by Kantoku binaries.

pub mod tracing_setup;
