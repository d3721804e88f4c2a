//! Probe logic and transport trait definitions for the Kantoku webhook probe.
//!
//! This crate defines the `WebhookClient` port that the infrastructure layer
//! implements, and the `ProbeRunner` that turns one exchange into a classified
//! report. It depends only on `kantoku-types` -- never on `kantoku-infra` or
//! any HTTP crate.

pub mod probe;
