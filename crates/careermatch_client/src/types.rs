use std::fmt;

use careermatch_core::{AccessToken, MatchList, RequestFailure, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// Human-readable reason, sourced from the server's `detail` when present.
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl From<ApiError> for RequestFailure {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            RequestFailure::session_expired(err.message)
        } else {
            RequestFailure::new(err.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Login rejected by the server (bad credentials).
    Auth,
    /// An authenticated call was refused; the stored session is no longer valid.
    Unauthorized,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidPayload,
    TooLarge { max_bytes: u64 },
    InvalidRequest,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Auth => write!(f, "authentication failed"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::InvalidPayload => write!(f, "invalid payload"),
            ApiErrorKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            ApiErrorKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}

/// Completion of a request issued through the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    LoginCompleted {
        request_id: RequestId,
        result: Result<AccessToken, ApiError>,
    },
    MatchesCompleted {
        request_id: RequestId,
        job_id: String,
        result: Result<MatchList, ApiError>,
    },
}
