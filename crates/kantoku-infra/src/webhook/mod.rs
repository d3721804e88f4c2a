//! Webhook transport over HTTP.

pub mod client;

pub use client::{ReqwestWebhookClient, webhook_origin};
