use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - check the remote API key")]
    Unauthorized,

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Rate limited by remote store")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No remote configured")]
    Offline,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl MirrorError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => MirrorError::Unauthorized,
            403 => MirrorError::AccessDenied(truncated),
            404 => MirrorError::NotFound(truncated),
            429 => MirrorError::RateLimited,
            500..=599 => MirrorError::ServerError(truncated),
            _ => MirrorError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}
