//! Errors from the enrichment service.

/// Failure modes of one enrichment request. None of these fail a run.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
