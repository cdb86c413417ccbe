use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

const ROUTER_BASE: &str = "http://careermatch.local/";

/// Characters escaped when a job id is written back into a path.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Jobs,
    ResumeUpload,
    Login,
    /// `/jobs/{job_id}/matches`; `job_id` may be blank, which mounts the
    /// view without issuing a request.
    JobMatches { job_id: String },
    NotFound(String),
}

impl Route {
    /// Resolves a path (optionally with query or fragment) against the
    /// application's route table.
    pub fn parse(input: &str) -> Route {
        let trimmed = input.trim();
        let resolved = Url::parse(ROUTER_BASE).and_then(|base| base.join(trimmed));
        let url = match resolved {
            Ok(url) => url,
            Err(_) => return Route::NotFound(trimmed.to_string()),
        };

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        let mut parts: Vec<&str> = segments.iter().map(String::as_str).collect();
        // Tolerate a trailing slash (`/jobs/`).
        if parts.len() > 1 && parts.last() == Some(&"") {
            parts.pop();
        }

        match parts.as_slice() {
            [] | [""] => Route::Landing,
            ["jobs"] => Route::Jobs,
            ["resume", "upload"] => Route::ResumeUpload,
            ["login"] => Route::Login,
            ["jobs", job_id, "matches"] => Route::JobMatches {
                job_id: job_id.trim().to_string(),
            },
            _ => Route::NotFound(url.path().to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::ResumeUpload => "/resume/upload".to_string(),
            Route::Login => "/login".to_string(),
            Route::JobMatches { job_id } => {
                format!("/jobs/{}/matches", utf8_percent_encode(job_id, SEGMENT))
            }
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether a nav link targeting `self` should be highlighted for `current`.
    pub fn is_active_for(&self, current: &Route) -> bool {
        match (self, current) {
            (Route::Jobs, Route::JobMatches { .. }) => true,
            _ => self == current,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
