use anyhow::Result;
use async_trait::async_trait;

/// Read-only view of the persisted user settings. Persistence itself is
/// owned elsewhere; the capture pipeline only ever reads one snapshot per
/// capture.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<serde_json::Value>>;
}
