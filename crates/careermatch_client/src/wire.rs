//! JSON shapes exchanged with the backend and their conversion into
//! the trusted domain types.

use std::collections::HashSet;

use careermatch_core::{AccessToken, Credentials, Match, MatchList};
use careermatch_logging::cm_warn;
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiErrorKind};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    data: Option<Vec<WireMatch>>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    resume_id: serde_json::Value,
    #[serde(default)]
    user: Option<String>,
    compatibility_score: f64,
    #[serde(default)]
    matched_skills: Option<String>,
    #[serde(default)]
    resume_skills: Option<String>,
    #[serde(default)]
    resume_experience: Option<String>,
}

fn invalid(message: impl Into<String>) -> ApiError {
    ApiError::new(ApiErrorKind::InvalidPayload, message)
}

pub(crate) fn parse_login(body: &[u8]) -> Result<AccessToken, ApiError> {
    let response: LoginResponse = serde_json::from_slice(body)
        .map_err(|err| invalid(format!("malformed login response: {err}")))?;
    match response.access {
        Some(access) if !access.trim().is_empty() => Ok(AccessToken::new(access)),
        _ => Err(invalid("login response did not contain an access token")),
    }
}

/// Extracts the server's `detail` message from an error body, if any.
pub(crate) fn parse_error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let detail = match parsed.detail? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => return None,
        other => other.to_string(),
    };
    let detail = detail.trim();
    (!detail.is_empty()).then(|| detail.to_string())
}

pub(crate) fn parse_matches(body: &[u8]) -> Result<MatchList, ApiError> {
    let response: MatchesResponse = serde_json::from_slice(body)
        .map_err(|err| invalid(format!("malformed matches response: {err}")))?;
    let records = response.data.unwrap_or_default();

    let mut seen = HashSet::with_capacity(records.len());
    let mut matches = Vec::with_capacity(records.len());
    for record in records {
        let parsed = Match::try_from(record)?;
        if !seen.insert(parsed.resume_id.clone()) {
            cm_warn!("Duplicate resume_id {} in matches response", parsed.resume_id);
        }
        matches.push(parsed);
    }
    Ok(matches)
}

impl TryFrom<WireMatch> for Match {
    type Error = ApiError;

    fn try_from(wire: WireMatch) -> Result<Self, Self::Error> {
        let resume_id = match wire.resume_id {
            serde_json::Value::String(id) => id,
            serde_json::Value::Number(id) => id.to_string(),
            other => return Err(invalid(format!("resume_id must be a string, got {other}"))),
        };
        if resume_id.trim().is_empty() {
            return Err(invalid("resume_id must not be empty"));
        }

        let score = wire.compatibility_score;
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(invalid(format!(
                "compatibility_score {score} for resume {resume_id} is outside 0-100"
            )));
        }

        Ok(Match {
            resume_id,
            user: wire.user.unwrap_or_default(),
            compatibility_score: score,
            matched_skills: wire.matched_skills.unwrap_or_default(),
            resume_skills: wire.resume_skills.unwrap_or_default(),
            resume_experience: wire.resume_experience.unwrap_or_default(),
        })
    }
}
