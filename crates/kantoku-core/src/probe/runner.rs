//! Probe runner: one request, one classified report.
//!
//! The runner owns no mutable state, so running it twice against the same
//! deterministic server yields the same classification both times.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use kantoku_types::config::DEFAULT_DAILY_GOAL_MINUTES;
use kantoku_types::error::ProbeError;
use kantoku_types::probe::{GenerateTasksPayload, ProbeOutcome, ProbeReport, WebhookResponse};

use super::client::WebhookClient;

/// Status code the workflow returns when it accepted the request.
const SUCCESS_STATUS: u16 = 200;

/// Sends a task generation payload through a [`WebhookClient`] and classifies
/// what came back.
pub struct ProbeRunner<C> {
    client: C,
    daily_goal_minutes: u32,
}

impl<C: WebhookClient> ProbeRunner<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
        }
    }

    /// Override the daily goal sent in every payload.
    pub fn with_daily_goal(mut self, daily_goal_minutes: u32) -> Self {
        self.daily_goal_minutes = daily_goal_minutes;
        self
    }

    /// Run one probe against `url` on behalf of `user_id`.
    ///
    /// Never fails: transport and decoding errors become a non-passing
    /// [`ProbeOutcome`] inside the report.
    pub async fn run(&self, url: &str, user_id: &str) -> ProbeReport {
        let payload = GenerateTasksPayload::with_goal(user_id, self.daily_goal_minutes);
        let started_at = Utc::now();
        let start = Instant::now();

        debug!(url, user_id, "Posting task generation payload");
        let result = self.client.post_json(url, &payload).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let outcome = classify(result);
        info!(url, outcome = %outcome, elapsed_ms, "Probe finished");

        ProbeReport {
            webhook_url: url.to_string(),
            user_id: user_id.to_string(),
            started_at,
            elapsed_ms,
            outcome,
        }
    }
}

/// Map a raw exchange result onto a [`ProbeOutcome`].
///
/// - 200 with a JSON body -> `Success`
/// - 200 with an empty or malformed body -> `Unexpected`
/// - any other status -> `HttpError` with the body verbatim
/// - connection/timeout errors -> their dedicated variants
/// - everything else -> `Unexpected`
pub fn classify(result: Result<WebhookResponse, ProbeError>) -> ProbeOutcome {
    match result {
        Ok(response) if response.status == SUCCESS_STATUS => decode_success(response),
        Ok(response) => ProbeOutcome::HttpError {
            status: response.status,
            body: response.body,
        },
        Err(ProbeError::Connection(message)) => ProbeOutcome::ConnectionFailed { message },
        Err(ProbeError::Timeout { timeout_secs }) => ProbeOutcome::TimedOut { timeout_secs },
        Err(other) => ProbeOutcome::Unexpected {
            message: other.to_string(),
        },
    }
}

fn decode_success(response: WebhookResponse) -> ProbeOutcome {
    if response.body.trim().is_empty() {
        return ProbeOutcome::Unexpected {
            message: ProbeError::EmptyResponse.to_string(),
        };
    }

    match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(body) => ProbeOutcome::Success {
            status: response.status,
            body,
        },
        Err(e) => ProbeOutcome::Unexpected {
            message: ProbeError::InvalidJson(e.to_string()).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // --- Mock client for testing ---

    /// Replies with a canned result and records every payload it was given.
    struct MockClient {
        reply: fn() -> Result<WebhookResponse, ProbeError>,
        seen: Mutex<Vec<(String, GenerateTasksPayload)>>,
    }

    impl MockClient {
        fn new(reply: fn() -> Result<WebhookResponse, ProbeError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl WebhookClient for MockClient {
        async fn post_json(
            &self,
            url: &str,
            payload: &GenerateTasksPayload,
        ) -> Result<WebhookResponse, ProbeError> {
            self.seen
                .lock()
                .unwrap()
                .push((url.to_string(), payload.clone()));
            (self.reply)()
        }
    }

    fn ok_json() -> Result<WebhookResponse, ProbeError> {
        Ok(WebhookResponse {
            status: 200,
            body: r#"{"ok": true}"#.to_string(),
        })
    }

    fn server_error() -> Result<WebhookResponse, ProbeError> {
        Ok(WebhookResponse {
            status: 500,
            body: "internal error".to_string(),
        })
    }

    fn refused() -> Result<WebhookResponse, ProbeError> {
        Err(ProbeError::Connection("connection refused".to_string()))
    }

    fn timed_out() -> Result<WebhookResponse, ProbeError> {
        Err(ProbeError::Timeout { timeout_secs: 30 })
    }

    const URL: &str = "http://localhost:5678/webhook-test/generate-tasks";
    const USER: &str = "ebc3cd0d-dc42-42c1-920a-87328627fe35";

    #[tokio::test]
    async fn success_response_passes() {
        let runner = ProbeRunner::new(MockClient::new(ok_json));
        let report = runner.run(URL, USER).await;

        assert!(report.passed());
        assert_eq!(
            report.outcome,
            ProbeOutcome::Success {
                status: 200,
                body: serde_json::json!({"ok": true}),
            }
        );
        assert_eq!(report.webhook_url, URL);
        assert_eq!(report.user_id, USER);
    }

    #[tokio::test]
    async fn server_error_keeps_body_verbatim() {
        let runner = ProbeRunner::new(MockClient::new(server_error));
        let report = runner.run(URL, USER).await;

        assert!(!report.passed());
        assert_eq!(
            report.outcome,
            ProbeOutcome::HttpError {
                status: 500,
                body: "internal error".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn connection_refused_is_connection_failure() {
        let runner = ProbeRunner::new(MockClient::new(refused));
        let report = runner.run(URL, USER).await;

        assert!(!report.passed());
        assert!(matches!(
            report.outcome,
            ProbeOutcome::ConnectionFailed { .. }
        ));
    }

    #[tokio::test]
    async fn timeout_is_timed_out() {
        let runner = ProbeRunner::new(MockClient::new(timed_out));
        let report = runner.run(URL, USER).await;

        assert!(!report.passed());
        assert_eq!(report.outcome, ProbeOutcome::TimedOut { timeout_secs: 30 });
    }

    #[tokio::test]
    async fn payload_carries_user_and_default_goal() {
        let runner = ProbeRunner::new(MockClient::new(ok_json));
        runner.run(URL, USER).await;

        let seen = runner.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, URL);
        assert_eq!(seen[0].1, GenerateTasksPayload::new(USER));
        assert_eq!(seen[0].1.daily_goal_minutes, 30);
    }

    #[tokio::test]
    async fn daily_goal_override_is_sent() {
        let runner = ProbeRunner::new(MockClient::new(ok_json)).with_daily_goal(45);
        runner.run(URL, USER).await;

        let seen = runner.client.seen.lock().unwrap();
        assert_eq!(seen[0].1.daily_goal_minutes, 45);
    }

    #[tokio::test]
    async fn repeated_runs_classify_identically() {
        let runner = ProbeRunner::new(MockClient::new(server_error));
        let first = runner.run(URL, USER).await;
        let second = runner.run(URL, USER).await;

        assert_eq!(first.outcome, second.outcome);
        // One request per run, no hidden retries.
        assert_eq!(runner.client.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn classify_malformed_success_body_is_unexpected() {
        let outcome = classify(Ok(WebhookResponse {
            status: 200,
            body: "<html>not json</html>".to_string(),
        }));
        match outcome {
            ProbeOutcome::Unexpected { message } => {
                assert!(message.starts_with("invalid JSON in response"));
            }
            other => panic!("expected Unexpected, got {other:?}"),
        }
    }

    #[test]
    fn classify_empty_success_body_hints_respond_node() {
        let outcome = classify(Ok(WebhookResponse {
            status: 200,
            body: "  \n".to_string(),
        }));
        match outcome {
            ProbeOutcome::Unexpected { message } => {
                assert!(message.contains("Respond to Webhook"));
            }
            other => panic!("expected Unexpected, got {other:?}"),
        }
    }

    #[test]
    fn classify_non_200_success_range_is_http_error() {
        let outcome = classify(Ok(WebhookResponse {
            status: 201,
            body: r#"{"ok": true}"#.to_string(),
        }));
        assert_eq!(outcome.status(), Some(201));
        assert!(!outcome.is_success());
    }

    #[test]
    fn classify_other_transport_error_is_unexpected() {
        let outcome = classify(Err(ProbeError::Request("builder error".to_string())));
        assert_eq!(
            outcome,
            ProbeOutcome::Unexpected {
                message: "request failed: builder error".to_string(),
            }
        );
    }

    #[test]
    fn classify_preserves_key_order_and_unicode() {
        let outcome = classify(Ok(WebhookResponse {
            status: 200,
            body: r#"{"zeta": 1, "alpha": "漢字"}"#.to_string(),
        }));
        let ProbeOutcome::Success { body, .. } = outcome else {
            panic!("expected Success");
        };
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(body["alpha"], "漢字");
    }
}
