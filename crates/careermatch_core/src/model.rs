use std::fmt;

/// Identifier attached to every issued request so late responses can be matched.
pub type RequestId = u64;

/// Ordered as returned by the server.
pub type MatchList = Vec<Match>;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential issued by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccessToken({})",
            careermatch_logging::redacted(&self.0)
        )
    }
}

/// One resume scored against one job posting. Never mutated client side.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub resume_id: String,
    pub user: String,
    pub compatibility_score: f64,
    pub matched_skills: String,
    pub resume_skills: String,
    pub resume_experience: String,
}

impl Match {
    pub fn display_name(&self) -> &str {
        let user = self.user.trim();
        if user.is_empty() {
            "Anonymous"
        } else {
            user
        }
    }

    /// Score rounded to one decimal, ties away from zero (87.25 -> 87.3).
    ///
    /// The tie test runs on `score * 10` in binary floating point, so a
    /// decimal tie such as 0.15, stored just below 0.15, still rounds up to
    /// 0.2. Rounding the exact stored value would give 0.1.
    pub fn rounded_score(&self) -> f64 {
        (self.compatibility_score * 10.0).round() / 10.0
    }
}

/// What the state machine needs to know about a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
    /// The server rejected the stored session (401 on an authenticated call).
    pub session_expired: bool,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_expired: false,
        }
    }

    pub fn session_expired(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_expired: true,
        }
    }
}
