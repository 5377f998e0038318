//! Delivers a finished artifact to the sink the settings ask for:
//! local-file download, clipboard behind an explicit confirmation, or a
//! fresh display surface.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::core::error::CaptureError;
use crate::core::interfaces::ports::{ClipboardPort, CopyAction, CopyConfirmation, SurfaceOpener};
use crate::core::models::{Artifact, OutputTarget};
use crate::global_constants;
use crate::utils::format_bytes;

pub struct OutputDispatcher {
    download_dir: PathBuf,
    clipboard: Arc<dyn ClipboardPort>,
    confirmation: Arc<dyn CopyConfirmation>,
    opener: Arc<dyn SurfaceOpener>,
}

impl OutputDispatcher {
    pub fn build(
        download_dir: PathBuf,
        clipboard: Arc<dyn ClipboardPort>,
        confirmation: Arc<dyn CopyConfirmation>,
        opener: Arc<dyn SurfaceOpener>,
    ) -> Self {
        Self {
            download_dir,
            clipboard,
            confirmation,
            opener,
        }
    }

    pub async fn dispatch(
        &self,
        artifact: &Artifact,
        target: OutputTarget,
    ) -> Result<(), CaptureError> {
        log::info!(
            "{} dispatching {} ({}) to {:?}",
            global_constants::LOG_TAG_DISPATCH,
            artifact.filename(),
            format_bytes(artifact.size_in_bytes()),
            target
        );

        match target {
            OutputTarget::Download => self.save_download(artifact).await,
            OutputTarget::Clipboard => self.copy_after_confirmation(artifact).await,
            OutputTarget::NewSurface => self.open_in_new_surface(artifact).await,
        }
    }

    async fn save_download(&self, artifact: &Artifact) -> Result<(), CaptureError> {
        let path = self.download_dir.join(artifact.filename());

        tokio::fs::write(&path, &artifact.markup)
            .await
            .map_err(|error| CaptureError::Dispatch(format!("saving {:?}: {}", path, error)))?;

        log::info!(
            "{} saved download to {:?}",
            global_constants::LOG_TAG_DISPATCH,
            path
        );
        Ok(())
    }

    /// Nothing reaches the clipboard until the user confirms. After a
    /// successful copy the confirmation acknowledges and dismisses
    /// itself shortly after.
    async fn copy_after_confirmation(&self, artifact: &Artifact) -> Result<(), CaptureError> {
        match self.confirmation.request_copy().await {
            CopyAction::Confirmed => {
                self.clipboard
                    .copy_text(artifact.markup.clone())
                    .map_err(|error| CaptureError::Dispatch(error.to_string()))?;

                self.confirmation.acknowledge_copied();
                tokio::time::sleep(Duration::from_millis(
                    global_constants::COPY_CONFIRMATION_DISMISS_MILLIS,
                ))
                .await;
                self.confirmation.dismiss();
                Ok(())
            }
            CopyAction::Dismissed => {
                log::info!(
                    "{} confirmation dismissed, nothing copied",
                    global_constants::LOG_TAG_DISPATCH
                );
                Ok(())
            }
        }
    }

    /// The artifact is written to a temporary object and opened with no
    /// opener linkage back to the captured document.
    async fn open_in_new_surface(&self, artifact: &Artifact) -> Result<(), CaptureError> {
        let path = std::env::temp_dir().join(format!(
            "{}-{}.{}",
            global_constants::TEMP_OBJECT_PREFIX,
            Uuid::new_v4(),
            global_constants::SVG_FILE_EXTENSION
        ));

        tokio::fs::write(&path, &artifact.markup)
            .await
            .map_err(|error| CaptureError::Dispatch(format!("writing {:?}: {}", path, error)))?;

        self.opener
            .open_detached(&path)
            .map_err(|error| CaptureError::Dispatch(error.to_string()))
    }
}
