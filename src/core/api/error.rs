//! Backend API error types.

/// Errors from a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, timeout or body transfer failure.
    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx HTTP status.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Extract the `message` field from a JSON error body, if there is one.
pub(super) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    message_field(&value)
}

pub(super) fn message_field(value: &serde_json::Value) -> Option<String> {
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}
