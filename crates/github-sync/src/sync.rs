//! Save/load of named JSON documents under `data/` in a GitHub repository.
//!
//! `save`/`load` never fail past this boundary: every problem is logged and
//! reported as `false`/`None`. Callers that need to tell problems apart use
//! `try_save`/`try_load`.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use reposync_core::{load_config, GitHubConfig, SettingsStore};

use crate::client::ContentsClient;
use crate::codec::{decode_document, encode_document};
use crate::error::{Result, SyncError};
use crate::types::{PutFileRequest, SaveOutcome};

/// Remote directory holding every synced document.
pub const DATA_DIR: &str = "data";

/// Repository path of a document.
pub fn document_path(filename: &str) -> Result<String> {
    let trimmed = filename.trim_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(SyncError::invalid_request(format!(
            "Invalid document filename '{}'",
            filename
        )));
    }
    Ok(format!("{}/{}", DATA_DIR, trimmed))
}

/// Commit message for a save, e.g. `Update notes.json - 2026-01-01T00:00:00.000Z`.
pub fn commit_message(filename: &str) -> String {
    format!(
        "Update {} - {}",
        filename,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Reads credentials from a settings store and syncs documents through the
/// contents API.
#[derive(Clone)]
pub struct SyncClient {
    store: Arc<dyn SettingsStore>,
    contents: ContentsClient,
}

impl SyncClient {
    /// Client against the public GitHub API.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            contents: ContentsClient::default(),
        }
    }

    /// Client against a GitHub-compatible API root.
    pub fn with_base_url(store: Arc<dyn SettingsStore>, base_url: &str) -> Self {
        Self {
            store,
            contents: ContentsClient::new(base_url),
        }
    }

    /// Current stored config. Store failures read as the empty config.
    pub fn config(&self) -> GitHubConfig {
        match load_config(self.store.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("[GitHubSync] Failed to read config: {}", e);
                GitHubConfig::default()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config().is_configured()
    }

    fn configured(&self) -> Result<GitHubConfig> {
        let config = load_config(self.store.as_ref())?;
        if !config.is_configured() {
            return Err(SyncError::NotConfigured);
        }
        Ok(config)
    }

    /// Save `value` as `data/<filename>`. Returns true on success.
    pub async fn save(&self, filename: &str, value: &Value) -> bool {
        match self.try_save(filename, value).await {
            Ok(outcome) => {
                info!(
                    "[GitHubSync] Synced {} ({})",
                    filename,
                    if outcome.created { "created" } else { "updated" }
                );
                true
            }
            Err(SyncError::NotConfigured) => {
                info!("[GitHubSync] Not configured, keeping {} local only", filename);
                false
            }
            Err(e) => {
                error!("[GitHubSync] Failed to sync {}: {}", filename, e);
                false
            }
        }
    }

    /// Load `data/<filename>`. Returns `None` when absent or on any failure.
    pub async fn load(&self, filename: &str) -> Option<Value> {
        match self.try_load(filename).await {
            Ok(Some(value)) => {
                info!("[GitHubSync] Loaded {}", filename);
                Some(value)
            }
            Ok(None) => {
                info!("[GitHubSync] Document does not exist: {}", filename);
                None
            }
            Err(SyncError::NotConfigured) => {
                info!("[GitHubSync] Not configured, cannot load {}", filename);
                None
            }
            Err(e) => {
                error!("[GitHubSync] Failed to load {}: {}", filename, e);
                None
            }
        }
    }

    /// Save with the failure kind exposed.
    ///
    /// Only a 404 from the revision probe means "create". Any other probe
    /// failure aborts the save, so a transient error never turns an update
    /// into a blind create.
    pub async fn try_save(&self, filename: &str, value: &Value) -> Result<SaveOutcome> {
        let config = self.configured()?;
        let path = document_path(filename)?;

        let sha = self
            .contents
            .get_file(&config, &path)
            .await?
            .map(|existing| existing.sha);
        debug!("[GitHubSync] Revision probe for {}: {:?}", path, sha);

        let request = PutFileRequest {
            message: commit_message(filename),
            content: encode_document(value)?,
            sha,
        };
        let created = request.sha.is_none();
        let response = self.contents.put_file(&config, &path, &request).await?;

        Ok(SaveOutcome {
            created,
            sha: response.content.map(|c| c.sha),
        })
    }

    /// Load with the failure kind exposed. `Ok(None)` means the file is absent.
    pub async fn try_load(&self, filename: &str) -> Result<Option<Value>> {
        let config = self.configured()?;
        let path = document_path(filename)?;

        match self.contents.get_file(&config, &path).await? {
            Some(file) => decode_document(&file.content).map(Some),
            None => Ok(None),
        }
    }

    /// Typed variant of [`save`](Self::save).
    pub async fn save_as<T: Serialize>(&self, filename: &str, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(value) => self.save(filename, &value).await,
            Err(e) => {
                error!("[GitHubSync] Failed to serialize {}: {}", filename, e);
                false
            }
        }
    }

    /// Typed variant of [`load`](Self::load). A shape mismatch reads as `None`.
    pub async fn load_as<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        let value = self.load(filename).await?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                error!("[GitHubSync] {} does not match the expected shape: {}", filename, e);
                None
            }
        }
    }
}
