//! GitHub credentials persisted in the settings store.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::store::SettingsStore;

/// Settings key holding the JSON-encoded [`GitHubConfig`].
pub const GITHUB_CONFIG_KEY: &str = "githubConfig";

/// Account, repository and access token used for remote sync.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl GitHubConfig {
    pub fn new(
        username: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            repo: Some(repo.into()),
            token: Some(token.into()),
        }
    }

    /// True only when username, repo and token are all present and non-empty.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// `(username, repo, token)` when fully configured.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }
        Some((
            non_empty(&self.username)?,
            non_empty(&self.repo)?,
            non_empty(&self.token)?,
        ))
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("username", &self.username)
            .field("repo", &self.repo)
            .field("has_token", &self.token.as_deref().is_some_and(|t| !t.is_empty()))
            .finish()
    }
}

/// Read the stored config.
///
/// A missing entry yields the empty config, as does an entry that is not
/// valid JSON (logged). Only store failures are returned as errors.
pub fn load_config(store: &dyn SettingsStore) -> Result<GitHubConfig> {
    let Some(raw) = store.get(GITHUB_CONFIG_KEY)? else {
        return Ok(GitHubConfig::default());
    };
    match serde_json::from_str::<GitHubConfig>(&raw) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Ignoring unreadable {}: {}", GITHUB_CONFIG_KEY, e);
            Ok(GitHubConfig::default())
        }
    }
}

pub fn save_config(store: &dyn SettingsStore, config: &GitHubConfig) -> Result<()> {
    let raw = serde_json::to_string(config)?;
    store.set(GITHUB_CONFIG_KEY, &raw)
}

pub fn clear_config(store: &dyn SettingsStore) -> Result<()> {
    store.delete(GITHUB_CONFIG_KEY)
}
