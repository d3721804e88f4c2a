//! WebhookClient trait definition.

use kantoku_types::error::ProbeError;
use kantoku_types::probe::{GenerateTasksPayload, WebhookResponse};

/// Transport for posting a JSON payload to a webhook.
///
/// Implementations send exactly one request per call and never retry. Any
/// HTTP status is a successful exchange (`Ok`); only transport failures
/// (refused connection, timeout, broken body) are `Err`.
///
/// The reqwest implementation lives in kantoku-infra.
pub trait WebhookClient: Send + Sync {
    /// POST `payload` as `application/json` to `url`.
    fn post_json(
        &self,
        url: &str,
        payload: &GenerateTasksPayload,
    ) -> impl std::future::Future<Output = Result<WebhookResponse, ProbeError>> + Send;
}
