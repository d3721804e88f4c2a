use thiserror::Error;

/// Errors from a single webhook exchange.
///
/// Produced by `WebhookClient` implementations and by the runner when a
/// successful response cannot be decoded. None of these escape the probe:
/// the runner folds every variant into a `ProbeOutcome`.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not connect: {0}")]
    Connection(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),

    #[error(
        "empty response from server; make sure the n8n workflow ends with a 'Respond to Webhook' node"
    )]
    EmptyResponse,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_display() {
        let err = ProbeError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "request timed out after 30s");
    }

    #[test]
    fn test_empty_response_mentions_respond_node() {
        let err = ProbeError::EmptyResponse;
        assert!(err.to_string().contains("Respond to Webhook"));
    }

    #[test]
    fn test_invalid_json_display() {
        let err = ProbeError::InvalidJson("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid JSON in response: expected value at line 1 column 1"
        );
    }
}
