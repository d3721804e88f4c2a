//! Infrastructure layer for the Kantoku webhook probe.
//!
//! Contains the reqwest implementation of the `WebhookClient` trait defined
//! in `kantoku-core`.

pub mod webhook;
