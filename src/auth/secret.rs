use async_trait::async_trait;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Secret store unreadable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Secret store is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read access to named secrets.
///
/// Implementations must not cache values: every call reflects the current
/// secret, so a rotated token takes effect on the next request.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, SecretError>;
}

/// In-memory store, mainly for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(secret_id.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, SecretError> {
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_id.to_string()))
    }
}

/// Secrets kept in a JSON object file: `{ "<secret id>": "<value>" }`.
/// The file is re-read on every lookup.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, SecretError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SecretError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Store `value` under `secret_id`, creating the file if needed.
    ///
    /// The new contents go to a sibling temp file that is then renamed over
    /// the store, so concurrent readers see either the old or the new file.
    pub async fn put_secret_value(&self, secret_id: &str, value: &str) -> Result<(), SecretError> {
        let mut secrets = match self.load().await {
            Ok(secrets) => secrets,
            Err(SecretError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        secrets.insert(secret_id.to_string(), value.to_string());

        let io_err = |source| SecretError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let rendered = serde_json::to_string_pretty(&secrets)?;

        let staging = self.staging_path();
        if let Err(source) = tokio::fs::write(&staging, rendered).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(source));
        }
        if let Err(source) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(source));
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "secrets".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, SecretError> {
        let mut secrets = self.load().await?;
        secrets
            .remove(secret_id)
            .ok_or_else(|| SecretError::NotFound(secret_id.to_string()))
    }
}

/// New 32-character token of mixed-case letters and digits (no punctuation)
pub fn generate_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_store_lookup() {
        let store = StaticSecretStore::new().with_secret("token", "abc123");
        assert_eq!(store.get_secret_value("token").await.unwrap(), "abc123");
        assert!(matches!(
            store.get_secret_value("other").await,
            Err(SecretError::NotFound(id)) if id == "other"
        ));
    }

    #[tokio::test]
    async fn file_store_round_trip_and_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSecretStore::new(dir.path().join("nested/secrets.json"));

        store.put_secret_value("token", "first").await.unwrap();
        assert_eq!(store.get_secret_value("token").await.unwrap(), "first");

        // No caching: a rotated value is visible immediately
        store.put_secret_value("token", "second").await.unwrap();
        assert_eq!(store.get_secret_value("token").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn file_store_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSecretStore::new(dir.path().join("absent.json"));
        assert!(matches!(
            store.get_secret_value("token").await,
            Err(SecretError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn file_store_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSecretStore::new(path);
        assert!(matches!(
            store.get_secret_value("token").await,
            Err(SecretError::Malformed(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reads_during_rotation_never_see_a_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSecretStore::new(dir.path().join("secrets.json"));
        store.put_secret_value("token", "tok0").await.unwrap();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 1..500 {
                    store.put_secret_value("token", &format!("tok{i}")).await.unwrap();
                }
            })
        };

        loop {
            let value = store.get_secret_value("token").await.unwrap();
            assert!(value.starts_with("tok"), "unexpected value {value}");
            if writer.is_finished() {
                break;
            }
        }
        writer.await.unwrap();
        assert_eq!(store.get_secret_value("token").await.unwrap(), "tok499");

        // Only the store itself is left behind
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn generated_secret_is_alphanumeric() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, generate_secret());
    }
}
