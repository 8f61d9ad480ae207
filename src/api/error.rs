//! API error types shared by the Jira and Confluence clients.
//!
//! Every remote-call outcome is reported as a value of [`ApiError`]; the
//! request layer never panics or exits on a bad response. Callers inspect
//! the variant and decide whether to surface, retry, or ignore.

use thiserror::Error;

/// Errors reported by the HTTP contract layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure: DNS, refused connection, TLS, broken pipe.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The configured deadline elapsed before a response arrived.
    #[error("request timed out")]
    Timeout,

    /// The server answered outside the 2xx class.
    ///
    /// Carries the status and the raw response body for diagnostics.
    #[error("HTTP {status}: {}", remote_message(.body))]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("could not decode response body: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Token storage or retrieval via the OS keyring failed.
    #[error("keyring error: {0}")]
    Keyring(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify a `reqwest` send/read failure.
    ///
    /// Timeouts are kept distinguishable from other transport failures.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err)
        }
    }

    /// The HTTP status of the response, if this error carries one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status().map(|s| s.as_u16()), Some(401) | Some(403))
    }

    /// Whether the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status().map(|s| s.as_u16()) == Some(404)
    }
}

/// Extract a human-readable message from an Atlassian error body.
///
/// Jira and Confluence both return `{"errorMessages": [...], "errors": {...}}`
/// on most failures. Falls back to a truncated raw body when the shape is
/// anything else.
fn remote_message(body: &str) -> String {
    if body.is_empty() {
        return "no response body".to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
            let joined: Vec<&str> = messages.iter().filter_map(|v| v.as_str()).collect();
            if !joined.is_empty() {
                return joined.join(", ");
            }
        }
        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            let joined: Vec<String> = errors
                .iter()
                .map(|(field, detail)| format!("{}: {}", field, detail))
                .collect();
            if !joined.is_empty() {
                return joined.join(", ");
            }
        }
        // Confluence nests its message one level down.
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    truncate(body, 200)
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    }
}
