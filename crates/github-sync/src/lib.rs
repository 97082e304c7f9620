//! GitHub-backed persistence for JSON documents.
//!
//! Documents live under `data/` in a user-owned repository and are written
//! through the GitHub Contents API. Credentials come from a
//! [`reposync_core::SettingsStore`].

pub mod client;
pub mod codec;
pub mod error;
pub mod sync;
pub mod types;

#[cfg(test)]
mod mock_server;

pub use client::{ContentsClient, DEFAULT_API_URL};
pub use codec::{decode_document, encode_document};
pub use error::{Result, SyncError};
pub use sync::{commit_message, document_path, SyncClient, DATA_DIR};
pub use types::*;
