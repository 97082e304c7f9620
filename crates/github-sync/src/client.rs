//! Client for the GitHub Contents REST API.
//!
//! Only the two calls the sync client needs are implemented: reading a file
//! (content + sha) and creating/updating a file.

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;

use reposync_core::GitHubConfig;

use crate::error::{Result, SyncError};
use crate::types::{ApiErrorResponse, ContentFile, PutFileRequest, PutFileResponse};

/// Public GitHub API host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;
const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("reposync/", env!("CARGO_PKG_VERSION"));

pub(crate) fn truncate_for_log(body: &str) -> String {
    let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
    if body.chars().count() > MAX_LOG_BODY_CHARS {
        preview.push_str("...");
    }
    preview
}

/// Percent-encode each segment of a repository path, keeping the slashes.
fn encode_repo_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone)]
pub struct ContentsClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ContentsClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ContentsClient {
    fn log_response(status: StatusCode, body: &str) {
        if status.is_success() {
            debug!("GitHub response status: {}", status);
            return;
        }
        debug!("GitHub response error ({}): {}", status, truncate_for_log(body));
    }

    /// Create a contents client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. "https://api.github.com" or a GitHub Enterprise "https://host/api/v3"
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contents_url(&self, config: &GitHubConfig, path: &str) -> Result<(String, String)> {
        let (username, repo, token) = config.credentials().ok_or(SyncError::NotConfigured)?;
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            urlencoding::encode(username),
            urlencoding::encode(repo),
            encode_repo_path(path)
        );
        Ok((url, token.to_string()))
    }

    fn headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let auth_value = HeaderValue::from_str(&format!("token {}", token))
            .map_err(|_| SyncError::invalid_request("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Turn a non-success response into an API error, preferring GitHub's `message`.
    fn api_error(status: StatusCode, body: &str) -> SyncError {
        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(body) {
            return SyncError::api(status.as_u16(), error.message);
        }
        SyncError::api(status.as_u16(), format!("Request failed: {}", body))
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize GitHub response. Body: {}, Error: {}",
                truncate_for_log(&body),
                e
            );
            SyncError::decode(format!("Failed to parse response: {}", e))
        })
    }

    /// Fetch a file's metadata and base64 content.
    ///
    /// Returns `Ok(None)` on 404.
    ///
    /// GET /repos/{owner}/{repo}/contents/{path}
    pub async fn get_file(&self, config: &GitHubConfig, path: &str) -> Result<Option<ContentFile>> {
        let (url, token) = self.contents_url(config, path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(&token)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("GitHub response status: 404 (absent)");
            return Ok(None);
        }

        Self::parse_response(response).await.map(Some)
    }

    /// Create or replace a file.
    ///
    /// `request.sha` must carry the current revision when the file exists.
    ///
    /// PUT /repos/{owner}/{repo}/contents/{path}
    pub async fn put_file(
        &self,
        config: &GitHubConfig,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<PutFileResponse> {
        let (url, token) = self.contents_url(config, path)?;
        debug!("PUT {} (sha={:?})", url, request.sha);

        let mut headers = self.headers(&token)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .put(&url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        // The write has landed at this point; an odd body only costs us the new sha.
        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!(
                    "GitHub accepted PUT {} ({}) but the body was unreadable: {}. Body: {}",
                    path,
                    status,
                    e,
                    truncate_for_log(&body)
                );
                Ok(PutFileResponse::default())
            }
        }
    }
}
