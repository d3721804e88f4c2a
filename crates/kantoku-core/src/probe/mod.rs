//! Single-shot webhook probing.

pub mod client;
pub mod runner;

pub use client::WebhookClient;
pub use runner::{ProbeRunner, classify};
