//! Local JSON-file store.
//!
//! One file plays the part of a single storage key: it holds a JSON
//! array of registrants. A missing or blank file is an empty list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use signup_core::registrant::Registrant;
use tokio::sync::Mutex;

use crate::{RegistrantStore, StoreError};

/// Registrants persisted as a JSON array in one file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Registrant>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn save(&self, registrants: &[Registrant]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(registrants)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RegistrantStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn add(&self, registrant: Registrant) -> Result<Registrant, StoreError> {
        let _guard = self.lock.lock().await;
        let mut registrants = self.load().await?;
        registrants.push(registrant.clone());
        self.save(&registrants).await?;
        tracing::debug!(path = %self.path.display(), count = registrants.len(), "Registrants saved");
        Ok(registrant)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
