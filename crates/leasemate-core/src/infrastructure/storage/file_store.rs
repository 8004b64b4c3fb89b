use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::models::KeyValueStore;
use crate::errors::CoreError;

/// File-backed key-value store: one small JSON map on disk.
///
/// Only two keys ever live here (the session identifier and the backend
/// address), written on explicit user actions, so a read-modify-write of the
/// whole file per operation is fine.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> FileStore {
        return FileStore { path };
    }

    /// Store under the platform data dir, e.g.
    /// `~/.local/share/leasemate/store.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        return dirs::data_dir().map(|dir| dir.join("leasemate/store.json"));
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, CoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        return Ok(serde_json::from_str(&raw)?);
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        return Ok(self.read_map().await?.remove(key));
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        return self.write_map(&map).await;
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            return self.write_map(&map).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get("user_id").await.unwrap(), None);
        store.set("user_id", "abc123").await.unwrap();
        store.set("backend_url", "http://localhost:8001").await.unwrap();

        assert_eq!(
            store.get("user_id").await.unwrap().as_deref(),
            Some("abc123")
        );
        assert_eq!(
            store.get("backend_url").await.unwrap().as_deref(),
            Some("http://localhost:8001")
        );

        store.remove("user_id").await.unwrap();
        assert_eq!(store.get("user_id").await.unwrap(), None);
        // The other key survives.
        assert!(store.get("backend_url").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/store.json");

        let store = FileStore::new(path.clone());
        store.set("user_id", "abc123").await.unwrap();

        let reopened = FileStore::new(path);
        assert_eq!(
            reopened.get("user_id").await.unwrap().as_deref(),
            Some("abc123")
        );
    }
}
