//! Request and response types for the GitHub Contents API.

use serde::{Deserialize, Serialize};

/// A file as returned by `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentFile {
    pub sha: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub encoding: Option<String>,
    /// Base64 payload, wrapped with newlines by GitHub.
    #[serde(default)]
    pub content: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    pub content: String,
    /// Revision being replaced. Omitted when creating a new file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutFileResponse {
    #[serde(default)]
    pub content: Option<ContentInfo>,
    #[serde(default)]
    pub commit: Option<CommitInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentInfo {
    pub sha: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// GitHub error body (`{"message": "...", "documentation_url": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// True when the file did not exist before this save.
    pub created: bool,
    /// Revision marker of the file after the save, if the API returned one.
    pub sha: Option<String>,
}
