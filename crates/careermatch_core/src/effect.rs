use crate::{AccessToken, Credentials, QueryKey, RequestId, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login {
        request_id: RequestId,
        credentials: Credentials,
    },
    FetchMatches {
        request_id: RequestId,
        job_id: String,
    },
    /// The view that issued `request_id` went away; its response is unwanted.
    Cancel { request_id: RequestId, key: QueryKey },
    StoreToken(AccessToken),
    ClearSession,
    Navigate(Route),
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// One transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}
