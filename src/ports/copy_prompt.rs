use async_trait::async_trait;

use crate::core::interfaces::ports::{CopyAction, CopyConfirmation};
use crate::global_constants::LOG_TAG_DISPATCH;

/// Confirmation prompt for environments without an interactive surface:
/// the copy action is confirmed immediately. An interactive presenter
/// would block in `request_copy` until the user clicks.
pub struct AutoConfirmingPrompt;

#[async_trait]
impl CopyConfirmation for AutoConfirmingPrompt {
    async fn request_copy(&self) -> CopyAction {
        log::info!("{} SVG ready, confirming copy", LOG_TAG_DISPATCH);
        CopyAction::Confirmed
    }

    fn acknowledge_copied(&self) {
        log::info!("{} copied to clipboard", LOG_TAG_DISPATCH);
    }

    fn dismiss(&self) {
        log::debug!("{} confirmation dismissed", LOG_TAG_DISPATCH);
    }
}
