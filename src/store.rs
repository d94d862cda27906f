//! File-backed credential store.
//!
//! The blob is the only recovery path after a crash, so every save lands on
//! disk before the caller proceeds: the new blob is written to a sibling
//! temp file and renamed over the target, never leaving a torn file.

use crate::Credentials;
use crate::error::{Result, StoreError};
use std::path::PathBuf;

/// Durable store for the opaque credential blob.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted credentials. `None` means no blob exists yet and
    /// the transport must authenticate from scratch.
    pub async fn load(&self) -> Result<Option<Credentials>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                }
                .into());
            }
        };

        let credentials =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(Some(credentials))
    }

    /// Persist `credentials`, replacing any previous blob atomically.
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        let bytes = serde_json::to_vec(credentials).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        let write = async {
            tokio::fs::write(&temp_path, &bytes).await?;
            tokio::fs::rename(&temp_path, &self.path).await
        };
        write.await.map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}
