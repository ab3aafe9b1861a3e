use reqwest::StatusCode;
use thiserror::Error;

pub const MAX_ERROR_BODY_CHARS: usize = 2048;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GET {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected payload from {endpoint}: {reason}")]
    UnexpectedPayload { endpoint: String, reason: String },
}

impl ApiError {
    pub fn status(endpoint: &str, status: StatusCode, body: &str) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
            body: truncate_for_log(body, MAX_ERROR_BODY_CHARS),
        }
    }

    pub fn unexpected(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedPayload {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}

pub fn truncate_for_log(value: &str, max_chars: usize) -> String {
    let trimmed = value.trim();
    let mut iter = trimmed.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = iter.next() else {
            return trimmed.to_string();
        };
        out.push(ch);
    }
    if iter.next().is_some() {
        out.push('…');
    }
    out
}
