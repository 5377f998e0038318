use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    Confirmed,
    Dismissed,
}

/// The dismissible on-screen confirmation shown for the clipboard sink.
/// Nothing is copied until the user explicitly confirms.
#[async_trait]
pub trait CopyConfirmation: Send + Sync {
    /// Shows the confirmation and waits for the user's choice.
    async fn request_copy(&self) -> CopyAction;
    /// Updates the confirmation to acknowledge a successful copy.
    fn acknowledge_copied(&self);
    fn dismiss(&self);
}
