use serde::{Deserialize, Serialize};

use crate::core::error::CaptureError;
use crate::core::interfaces::adapters::SettingsStore;
use crate::global_constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Download,
    Clipboard,
    NewSurface,
}

impl OutputTarget {
    /// Target values arrive from the settings store as plain strings; an
    /// unrecognized value is a fatal configuration error for the capture.
    pub fn parse(value: &str) -> Result<Self, CaptureError> {
        match value {
            global_constants::OUTPUT_TARGET_DOWNLOAD => Ok(OutputTarget::Download),
            global_constants::OUTPUT_TARGET_CLIPBOARD => Ok(OutputTarget::Clipboard),
            global_constants::OUTPUT_TARGET_NEW_SURFACE => Ok(OutputTarget::NewSurface),
            other => Err(CaptureError::Configuration(format!(
                "unexpected output target: {}",
                other
            ))),
        }
    }
}

/// Immutable snapshot of the user's capture preferences, read once at the
/// start of every capture and never mutated mid-capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    pub keep_links: bool,
    pub inline_resources: bool,
    pub minify: bool,
    pub pretty_print: bool,
    pub output_target: OutputTarget,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            keep_links: true,
            inline_resources: true,
            minify: false,
            pretty_print: false,
            output_target: OutputTarget::Download,
        }
    }
}

impl CaptureSettings {
    /// Loads a fresh snapshot from the store, falling back to the default
    /// for every unset key. Only an unrecognized output target is fatal.
    pub async fn load(store: &dyn SettingsStore) -> Result<Self, CaptureError> {
        let defaults = Self::default();

        let keep_links = read_bool(
            store,
            global_constants::SETTING_KEY_KEEP_LINKS,
            defaults.keep_links,
        )
        .await;
        let inline_resources = read_bool(
            store,
            global_constants::SETTING_KEY_INLINE_RESOURCES,
            defaults.inline_resources,
        )
        .await;
        let minify = read_bool(store, global_constants::SETTING_KEY_MINIFY, defaults.minify).await;
        let pretty_print = read_bool(
            store,
            global_constants::SETTING_KEY_PRETTY_PRINT,
            defaults.pretty_print,
        )
        .await;

        let output_target = match read_value(store, global_constants::SETTING_KEY_OUTPUT_TARGET)
            .await
        {
            Some(value) => match value.as_str() {
                Some(text) => OutputTarget::parse(text)?,
                None => {
                    return Err(CaptureError::Configuration(format!(
                        "unexpected output target: {}",
                        value
                    )))
                }
            },
            None => defaults.output_target,
        };

        let settings = Self {
            keep_links,
            inline_resources,
            minify,
            pretty_print,
            output_target,
        };

        log::debug!(
            "{} loaded snapshot: {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings
        );

        Ok(settings)
    }
}

async fn read_value(store: &dyn SettingsStore, key: &str) -> Option<serde_json::Value> {
    match store.read(key).await {
        Ok(value) => value,
        Err(error) => {
            log::warn!(
                "{} failed to read '{}': {}, using default",
                global_constants::LOG_TAG_SETTINGS,
                key,
                error
            );
            None
        }
    }
}

async fn read_bool(store: &dyn SettingsStore, key: &str, default: bool) -> bool {
    read_value(store, key)
        .await
        .and_then(|value| value.as_bool())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

    struct MapSettingsStore {
        values: HashMap<String, serde_json::Value>,
    }

    #[async_trait]
    impl SettingsStore for MapSettingsStore {
        async fn read(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
            Ok(self.values.get(key).cloned())
        }
    }

    fn store_with(entries: &[(&str, serde_json::Value)]) -> MapSettingsStore {
        MapSettingsStore {
            values: entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_load_applies_defaults_for_unset_keys() {
        let store = store_with(&[]);

        let settings = CaptureSettings::load(&store).await.unwrap();

        assert_eq!(settings, CaptureSettings::default());
    }

    #[tokio::test]
    async fn test_load_reads_stored_values() {
        let store = store_with(&[
            ("keepLinks", serde_json::json!(false)),
            ("minifySvg", serde_json::json!(true)),
            ("target", serde_json::json!("clipboard")),
        ]);

        let settings = CaptureSettings::load(&store).await.unwrap();

        assert!(!settings.keep_links);
        assert!(settings.minify);
        assert_eq!(settings.output_target, OutputTarget::Clipboard);
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_output_target() {
        let store = store_with(&[("target", serde_json::json!("printer"))]);

        let error = CaptureSettings::load(&store).await.unwrap_err();

        assert!(matches!(error, CaptureError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_load_rejects_non_string_output_target() {
        let store = store_with(&[("target", serde_json::json!(7))]);

        let error = CaptureSettings::load(&store).await.unwrap_err();

        assert!(matches!(error, CaptureError::Configuration(_)));
    }

    #[test]
    fn test_output_target_parse_known_values() {
        assert_eq!(
            OutputTarget::parse("download").unwrap(),
            OutputTarget::Download
        );
        assert_eq!(
            OutputTarget::parse("clipboard").unwrap(),
            OutputTarget::Clipboard
        );
        assert_eq!(OutputTarget::parse("tab").unwrap(), OutputTarget::NewSurface);
    }
}
