//! HTTP plumbing shared by the network backends.

use crate::backend::{LlmError, LlmResult};
use std::time::Duration;

/// Client with the backend's request timeout applied.
pub(crate) fn client(timeout_secs: u32) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(u64::from(timeout_secs)))
        .build()
        .map_err(|e| LlmError::ClientSetup(e.to_string()))
}

/// Classify a transport failure talking to `service`.
pub(crate) fn send_error(e: reqwest::Error, service: &str, timeout_secs: u32) -> LlmError {
    if e.is_connect() {
        LlmError::ConnectionFailed(format!("{service} is unreachable: {e}"))
    } else if e.is_timeout() {
        LlmError::Timeout(timeout_secs)
    } else {
        LlmError::ApiError(e.to_string())
    }
}

/// Turn a non-success status into an error, reading the body for context.
pub(crate) async fn status_error(response: reqwest::Response, service: &str) -> LlmError {
    let status = response.status();
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            LlmError::RateLimited(retry_after)
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            LlmError::ApiError(format!("{service} returned {status}: {body}"))
        }
    }
}
