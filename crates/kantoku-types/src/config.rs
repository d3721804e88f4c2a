//! Run configuration for a single probe.
//!
//! `ProbeConfig` carries the target URL, the test user, the daily goal sent
//! in the payload and the request timeout. Defaults reproduce the fixed
//! development setup: a local n8n instance on port 5678.

use std::time::Duration;

/// Test webhook URL of the "Generate Tasks" workflow on a local n8n instance.
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook-test/generate-tasks";

/// User id of the development test account.
pub const DEFAULT_TEST_USER_ID: &str = "ebc3cd0d-dc42-42c1-920a-87328627fe35";

/// Daily study goal sent with every task generation request.
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 30;

/// Upper bound on the whole request/response exchange.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved settings for one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub webhook_url: String,
    pub user_id: String,
    pub daily_goal_minutes: u32,
    pub timeout_secs: u64,
}

impl ProbeConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            user_id: DEFAULT_TEST_USER_ID.to_string(),
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_config_default_values() {
        let config = ProbeConfig::default();
        assert_eq!(
            config.webhook_url,
            "http://localhost:5678/webhook-test/generate-tasks"
        );
        assert_eq!(config.user_id, "ebc3cd0d-dc42-42c1-920a-87328627fe35");
        assert_eq!(config.daily_goal_minutes, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
