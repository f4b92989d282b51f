use crate::core::results::KeyRecord;
use crate::core::traits::KeySource;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{error, info};

/// Loads a caller-supplied key set from a local JSON file.
///
/// The file holds an array of records: `[{"key_id": 1, "group_id": 0,
/// "api_key": "sk-..."}, ...]`. Like the remote source, any failure yields
/// an empty vec.
pub struct FileKeySource {
    path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KeySource for FileKeySource {
    async fn fetch_keys(&self) -> Vec<KeyRecord> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<KeyRecord>>(&json) {
            Ok(keys) => {
                info!("Loaded {} keys from {}", keys.len(), self.path.display());
                keys
            }
            Err(e) => {
                error!("Failed to parse {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}
