//! Error taxonomy for the upstream access layer
//!
//! A closed set of tagged variants; callers branch on the variant (and its
//! structured fields), never on message text.

use hyper::StatusCode;

/// Everything that can go wrong between "I need a fact" and "here is one".
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Could not reach the upstream at all, or the request timed out.
    #[error("upstream unreachable: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status code.
    #[error("upstream responded with status {status}")]
    Protocol { status: u16 },

    /// The upstream answered 2xx but the body did not parse as a fact.
    #[error("upstream response did not decode: {0}")]
    Decode(String),

    /// Admission was denied before any network call was attempted.
    #[error("rate limit exceeded, no upstream call attempted")]
    RateLimited,
}

impl FetchError {
    /// Snake-case code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "upstream_unreachable",
            FetchError::Protocol { .. } => "upstream_error",
            FetchError::Decode(_) => "upstream_decode_error",
            FetchError::RateLimited => "rate_limited",
        }
    }

    /// HTTP status the boundary maps this kind to.
    ///
    /// Admission denial signals "try again later" (429); the three upstream
    /// kinds all mean "the dependency is broken right now" (503).
    pub fn http_status(&self) -> StatusCode {
        match self {
            FetchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
