use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::CoreError;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";

/// Client configuration, loaded from a YAML file when one exists.
///
/// The persisted last-used backend address (key-value store) takes
/// precedence over `backend_url` at startup; the file only supplies
/// defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: u64,
}

impl Default for Config {
    fn default() -> Config {
        return Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: 120,
            max_upload_bytes: 10 * 1024 * 1024,
        };
    }
}

impl Config {
    /// Default config file location, e.g. `~/.config/leasemate/config.yaml`
    /// on Linux.
    pub fn default_path() -> Option<PathBuf> {
        return dirs::config_dir().map(|dir| dir.join("leasemate/config.yaml"));
    }

    /// Loads the file at `path`, or defaults when it does not exist.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Config, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| CoreError::Config(format!("failed to read {path:?}: {err}")))?;
        return serde_yaml::from_str(&raw)
            .map_err(|err| CoreError::Config(format!("invalid config {path:?}: {err}")));
    }
}
