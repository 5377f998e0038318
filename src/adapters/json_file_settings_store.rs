//! Read-only view over the settings file the settings UI owns. The file
//! is re-read on every key so each capture sees a fresh snapshot.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::interfaces::adapters::SettingsStore;
use crate::global_constants;

pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn at_default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not find config directory"))?
            .join(global_constants::SETTINGS_DIR_NAME);

        Ok(Self::at_path(
            config_dir.join(global_constants::SETTINGS_FILE_NAME),
        ))
    }

    pub fn at_path(path: PathBuf) -> Self {
        log::debug!(
            "{} reading settings from {:?}",
            global_constants::LOG_TAG_SETTINGS,
            path
        );
        Self { path }
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        let document: serde_json::Value = serde_json::from_str(&contents)?;

        Ok(document.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_contents(contents: &str) -> (tempfile::TempDir, JsonFileSettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, contents).unwrap();
        (dir, JsonFileSettingsStore::at_path(path))
    }

    #[tokio::test]
    async fn test_reads_values_by_key() {
        let (_dir, store) = store_with_contents(r#"{"keepLinks": false, "target": "clipboard"}"#);

        assert_eq!(
            store.read("keepLinks").await.unwrap(),
            Some(serde_json::json!(false))
        );
        assert_eq!(
            store.read("target").await.unwrap(),
            Some(serde_json::json!("clipboard"))
        );
    }

    #[tokio::test]
    async fn test_missing_keys_read_as_unset() {
        let (_dir, store) = store_with_contents("{}");

        assert_eq!(store.read("minifySvg").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::at_path(dir.path().join("absent.json"));

        assert_eq!(store.read("keepLinks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (_dir, store) = store_with_contents("not json at all");

        assert!(store.read("keepLinks").await.is_err());
    }
}
