use std::fmt;

use crate::RequestId;

/// Lifecycle of one asynchronous query as observed by the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Identity of a query; at most one request is in flight per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Login,
    JobMatches(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Login => write!(f, "login"),
            QueryKey::JobMatches(job_id) => write!(f, "job-matches/{job_id}"),
        }
    }
}

/// Outcome of feeding a response into a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Loaded,
    /// Entered `Failed`; carries the reason exactly once per failure.
    Failed(String),
    /// Response belongs to a request that is no longer current.
    Stale,
}

/// Per-key view-state controller.
///
/// Invariant: `in_flight` is `Some` exactly when `state` is `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<T> {
    key: QueryKey,
    state: ViewState<T>,
    in_flight: Option<RequestId>,
}

impl<T> Query<T> {
    pub fn new(key: QueryKey) -> Self {
        Self {
            key,
            state: ViewState::Idle,
            in_flight: None,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Moves to `Loading` under `request_id`. Returns false (and changes
    /// nothing) while a request is already pending.
    pub fn invoke(&mut self, request_id: RequestId) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ViewState::Loading;
        self.in_flight = Some(request_id);
        true
    }

    /// Applies a response. Only the request currently in flight may
    /// transition the query; anything else is reported as stale.
    pub fn resolve(&mut self, request_id: RequestId, result: Result<T, String>) -> Resolution {
        if self.in_flight != Some(request_id) || !self.state.is_loading() {
            return Resolution::Stale;
        }
        self.in_flight = None;
        match result {
            Ok(data) => {
                self.state = ViewState::Loaded(data);
                Resolution::Loaded
            }
            Err(reason) => {
                self.state = ViewState::Failed(reason.clone());
                Resolution::Failed(reason)
            }
        }
    }

    /// Records a failure that happened before any request was issued.
    /// Ignored while a request is pending.
    pub fn reject(&mut self, reason: impl Into<String>) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ViewState::Failed(reason.into());
        true
    }

    /// Drops back to `Idle`, returning the abandoned request if any.
    pub fn reset(&mut self) -> Option<RequestId> {
        self.state = ViewState::Idle;
        self.in_flight.take()
    }
}
