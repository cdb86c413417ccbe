use std::time::Duration;

use careermatch_core::{AccessToken, Credentials, MatchList};
use careermatch_logging::{cm_debug, cm_info, cm_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};

use crate::wire::{self, LoginRequest};
use crate::{ApiError, ApiErrorKind};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// The two backend operations the UI consumes. Implementations own no state
/// beyond their transport.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError>;

    async fn job_matches(
        &self,
        job_id: &str,
        token: Option<&AccessToken>,
    ) -> Result<MatchList, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    base_url: Url,
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl ReqwestApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(settings.base_url.trim()).map_err(|err| {
            ApiError::new(
                ApiErrorKind::InvalidRequest,
                format!("invalid API base url {:?}: {err}", settings.base_url),
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                ApiErrorKind::InvalidRequest,
                format!("API base url {base_url} cannot carry a path"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;

        Ok(Self {
            base_url,
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::new(ApiErrorKind::InvalidRequest, "API base url cannot carry a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let too_large = |actual: u64| {
            ApiError::new(
                ApiErrorKind::TooLarge {
                    max_bytes: self.max_body_bytes,
                },
                format!("response too large ({actual} bytes)"),
            )
        };
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_body_bytes {
                return Err(too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        let url = self.endpoint(&["login"])?;
        let body = serde_json::to_vec(&LoginRequest::from(credentials))
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidRequest, err.to_string()))?;
        cm_info!("POST {} user={}", url, credentials.username);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            let kind = match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ApiErrorKind::Auth
                }
                other => ApiErrorKind::HttpStatus(other.as_u16()),
            };
            let err = status_error(kind, status, &body);
            cm_warn!("Login rejected: {} ({})", err.message, err.kind);
            return Err(err);
        }

        let token = wire::parse_login(&body)?;
        cm_debug!("Login succeeded, token {:?}", token);
        Ok(token)
    }

    async fn job_matches(
        &self,
        job_id: &str,
        token: Option<&AccessToken>,
    ) -> Result<MatchList, ApiError> {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return Err(ApiError::new(
                ApiErrorKind::InvalidRequest,
                "job id is required",
            ));
        }
        let url = self.endpoint(&["jobs", job_id, "matches"])?;
        cm_info!("GET {} authenticated={}", url, token.is_some());

        let mut request = self.client.get(url).header(ACCEPT, JSON);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            let kind = if status == StatusCode::UNAUTHORIZED {
                ApiErrorKind::Unauthorized
            } else {
                ApiErrorKind::HttpStatus(status.as_u16())
            };
            let err = status_error(kind, status, &body);
            cm_warn!("Matches for job {} failed: {} ({})", job_id, err.message, err.kind);
            return Err(err);
        }

        let matches = wire::parse_matches(&body)?;
        cm_info!("Received {} matches for job {}", matches.len(), job_id);
        Ok(matches)
    }
}

fn status_error(kind: ApiErrorKind, status: StatusCode, body: &[u8]) -> ApiError {
    let message = wire::parse_error_detail(body).unwrap_or_else(|| {
        format!("Request failed with status code {}", status.as_u16())
    });
    ApiError::new(kind, message)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
