//! reqwest-backed webhook client.
//!
//! Sends one JSON POST per call with a whole-exchange timeout and maps
//! reqwest failures onto [`ProbeError`] so the runner can tell a dead server
//! from a slow one.

use std::error::Error as _;
use std::io::ErrorKind;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use kantoku_core::probe::WebhookClient;
use kantoku_types::error::ProbeError;
use kantoku_types::probe::{GenerateTasksPayload, WebhookResponse};

const USER_AGENT: &str = concat!("kantoku-probe/", env!("CARGO_PKG_VERSION"));

/// [`WebhookClient`] over a reqwest connection pool.
///
/// The timeout covers connect, send and reading the full body. There are no
/// retries: a failed call is final. System proxy settings are ignored; the
/// webhook under test runs on the developer's machine or LAN.
pub struct ReqwestWebhookClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestWebhookClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| ProbeError::ClientInit(error_chain(&e)))?;

        Ok(Self { http, timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> ProbeError {
        match failure_kind(err.is_connect(), err.is_timeout(), &err) {
            FailureKind::Connection => ProbeError::Connection(error_chain(&err)),
            FailureKind::Timeout => ProbeError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            },
            FailureKind::Other => ProbeError::Request(error_chain(&err)),
        }
    }
}

/// Coarse class of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Connection,
    Timeout,
    Other,
}

/// Classify a transport failure from reqwest's flags and the error chain.
///
/// Connect-phase failures are connection failures even when the connect
/// itself timed out. So is a server that closes or resets the socket
/// before answering. Only a timeout after the connection was established
/// counts as `Timeout`.
fn failure_kind(
    is_connect: bool,
    is_timeout: bool,
    err: &(dyn std::error::Error + 'static),
) -> FailureKind {
    if is_connect || is_dropped_connection(err) {
        FailureKind::Connection
    } else if is_timeout {
        FailureKind::Timeout
    } else {
        FailureKind::Other
    }
}

/// Whether any error in the chain says the peer went away mid-exchange.
fn is_dropped_connection(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        if let Some(http) = cause.downcast_ref::<hyper::Error>() {
            if http.is_incomplete_message() || http.is_closed() {
                return true;
            }
        }
        current = cause.source();
    }
    false
}

impl WebhookClient for ReqwestWebhookClient {
    async fn post_json(
        &self,
        url: &str,
        payload: &GenerateTasksPayload,
    ) -> Result<WebhookResponse, ProbeError> {
        debug!(url, timeout_ms = self.timeout.as_millis() as u64, "Sending webhook request");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let err = self.map_error(e);
                warn!(url, error = %err, "Webhook request failed");
                err
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let err = self.map_error(e);
            warn!(url, status, error = %err, "Failed to read webhook response body");
            err
        })?;

        debug!(url, status, body_len = body.len(), "Webhook responded");
        Ok(WebhookResponse { status, body })
    }
}

/// `scheme://host[:port]` of `url`, for pointing at the server that should be
/// running. `None` when the URL does not parse or has no host.
pub fn webhook_origin(url: &str) -> Option<String> {
    let origin = reqwest::Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Flatten an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request for url ...") hides
/// the useful part, e.g. "Connection refused (os error 111)".
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
