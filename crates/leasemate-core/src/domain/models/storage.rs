use async_trait::async_trait;

use crate::errors::CoreError;

/// Storage key for the last-used session identifier.
pub const USER_ID_KEY: &str = "user_id";
/// Storage key for the last-used backend base address.
pub const BACKEND_URL_KEY: &str = "backend_url";

/// Durable key-value storage for the two persisted strings this layer keeps.
///
/// Values are read once at startup and overwritten only on explicit user
/// actions, so no concurrent-writer scenario needs guarding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    async fn remove(&self, key: &str) -> Result<(), CoreError>;
}
