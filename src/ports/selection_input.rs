use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::core::interfaces::ports::{SelectionEvent, SelectionEventSource};
use crate::global_constants::SELECTION_CHANNEL_CAPACITY;

/// Channel-backed selection input. Whatever produces pointer/keyboard
/// events pushes them into the sender half; the selector pulls them one
/// at a time.
pub struct ChannelSelectionSource {
    receiver: Mutex<mpsc::Receiver<SelectionEvent>>,
}

impl ChannelSelectionSource {
    pub fn create() -> (mpsc::Sender<SelectionEvent>, Self) {
        let (sender, receiver) = mpsc::channel(SELECTION_CHANNEL_CAPACITY);
        (
            sender,
            Self {
                receiver: Mutex::new(receiver),
            },
        )
    }
}

#[async_trait]
impl SelectionEventSource for ChannelSelectionSource {
    async fn next_event(&self) -> Option<SelectionEvent> {
        self.receiver.lock().await.recv().await
    }
}
