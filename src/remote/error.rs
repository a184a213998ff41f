use reqwest::StatusCode;

use super::types::UpstreamMessage;

/// Failure of a single API call.
///
/// Upstream messages are kept verbatim so callers can show them as-is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized: {0} (sign in again with `repodeck login`)")]
    Unauthorized(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Stale or missing content fingerprint.
    #[error("{message}")]
    Conflict { status: StatusCode, message: String },

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("upstream returned {0}")]
    Status(StatusCode),

    /// Refused locally; never sent.
    #[error("invalid repository path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = upstream_message(body);
        if status == StatusCode::UNAUTHORIZED {
            return Self::Unauthorized(message.unwrap_or_else(|| "Bad credentials".to_string()));
        }
        let Some(message) = message else {
            return Self::Status(status);
        };
        let stale_sha = status == StatusCode::UNPROCESSABLE_ENTITY && message.contains("sha");
        if status == StatusCode::CONFLICT || stale_sha {
            Self::Conflict { status, message }
        } else {
            Self::Rejected { status, message }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Transport(e) => e.status(),
            Self::Conflict { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Status(status) => Some(*status),
            Self::InvalidPath(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Human-readable message from an upstream error body.
///
/// The top-level `message` comes first; the first detailed `errors[]` message, when present,
/// is appended after a colon.
pub(super) fn upstream_message(body: &str) -> Option<String> {
    let parsed: UpstreamMessage = serde_json::from_str(body).ok()?;
    let detail = parsed.errors.iter().find_map(|e| match e {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(o) => o.get("message").and_then(|m| m.as_str()).map(str::to_string),
        _ => None,
    });
    match (parsed.message, detail) {
        (Some(m), Some(d)) => Some(format!("{}: {}", m.trim_end_matches('.'), d)),
        (Some(m), None) => Some(m),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization was denied")]
    Denied,

    #[error("device code expired before authorization completed")]
    Expired,

    #[error("identity provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
#[path = "../tests/remote/error_tests.rs"]
mod tests;
