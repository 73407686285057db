//! Credential Storage
//!
//! The admin token lives in an opaque key-value store owned by the host
//! platform. The client only needs get/set/remove of string pairs, so the
//! store is a trait object and the platform's encrypted storage plugs in
//! behind it.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryCredentialStore`] keeps values for the life of the process.
//! - [`FileCredentialStore`] keeps a small JSON map on disk, readable by
//!   the owner only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Key the admin bearer token is stored under
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential storage is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
}

/// Opaque string key-value storage for credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, CredentialError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), CredentialError>;
    async fn remove_item(&self, key: &str) -> Result<(), CredentialError>;
}

/// Process-lifetime credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), CredentialError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// JSON-file credential store with owner-only permissions
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/grievance-desk/credentials.json`
    pub fn in_data_dir() -> Result<Self, CredentialError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| CredentialError::Unavailable("no data directory".to_string()))?;
        Ok(Self::new(dir.join("grievance-desk").join("credentials.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, CredentialError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file in one rename. The data is written to a sibling
    /// file that is owner-only from the moment it exists.
    async fn save(&self, items: &HashMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(items)?;

        let staging = self.path.with_extension("json.tmp");
        let mut file = create_owner_only(&staging).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&staging, &self.path).await?;

        debug!(path = %self.path.display(), entries = items.len(), "credential file written");
        Ok(())
    }
}

/// Create a fresh file that only the current user can read. A leftover
/// file at `path` is removed first so its permissions are not inherited.
async fn create_owner_only(path: &Path) -> Result<tokio::fs::File, CredentialError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    Ok(options.open(path).await?)
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), CredentialError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.save(&items).await?;
        }
        Ok(())
    }
}
