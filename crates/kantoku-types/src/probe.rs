//! Probe request/response types.
//!
//! A probe sends one [`GenerateTasksPayload`] to the webhook, receives a raw
//! [`WebhookResponse`] (or a transport error), and ends up as a
//! [`ProbeReport`] carrying the classified [`ProbeOutcome`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DAILY_GOAL_MINUTES;

/// JSON body accepted by the "Generate Tasks" workflow webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTasksPayload {
    pub user_id: String,
    pub daily_goal_minutes: u32,
}

impl GenerateTasksPayload {
    /// Payload for `user_id` with the standard daily goal.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_goal(user_id, DEFAULT_DAILY_GOAL_MINUTES)
    }

    pub fn with_goal(user_id: impl Into<String>, daily_goal_minutes: u32) -> Self {
        Self {
            user_id: user_id.into(),
            daily_goal_minutes,
        }
    }
}

/// Raw HTTP response as seen by the transport: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Classified result of one webhook exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// HTTP 200 with a decodable JSON body.
    Success {
        status: u16,
        body: serde_json::Value,
    },
    /// Any non-200 status. The body is kept verbatim.
    HttpError { status: u16, body: String },
    /// The target refused or could not be reached.
    ConnectionFailed { message: String },
    /// No response within the timeout.
    TimedOut { timeout_secs: u64 },
    /// Anything else, including an undecodable 200 body.
    Unexpected { message: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// HTTP status code, when a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status, .. } | ProbeOutcome::HttpError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success { .. } => write!(f, "success"),
            ProbeOutcome::HttpError { status, .. } => write!(f, "http error {status}"),
            ProbeOutcome::ConnectionFailed { .. } => write!(f, "connection failed"),
            ProbeOutcome::TimedOut { .. } => write!(f, "timed out"),
            ProbeOutcome::Unexpected { .. } => write!(f, "unexpected error"),
        }
    }
}

/// Everything known about one probe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub webhook_url: String,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the exchange in milliseconds.
    pub elapsed_ms: u64,
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    /// The probe passes only on an HTTP 200 with a JSON body.
    pub fn passed(&self) -> bool {
        self.outcome.is_success()
    }
}
