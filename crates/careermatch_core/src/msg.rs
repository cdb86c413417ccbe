use crate::{AccessToken, MatchList, RequestFailure, RequestId, Route};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The router mounted a new route.
    RouteChanged(Route),
    /// Whether a stored session was found at start-up or after a store change.
    SessionRestored { active: bool },
    /// User edited the username field.
    UsernameChanged(String),
    /// User edited the password field.
    PasswordChanged(String),
    /// User submitted the login form.
    LoginSubmitted,
    /// The login request finished.
    LoginFinished {
        request_id: RequestId,
        result: Result<AccessToken, RequestFailure>,
    },
    /// User asked to reload the mounted matches view.
    RetryClicked,
    /// The matches request for `job_id` finished.
    MatchesFinished {
        request_id: RequestId,
        job_id: String,
        result: Result<MatchList, RequestFailure>,
    },
    /// User clicked Logout.
    LogoutClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
