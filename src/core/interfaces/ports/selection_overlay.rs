use async_trait::async_trait;

use crate::core::models::{Region, Viewport};

/// Pointer and keyboard input feeding a region selection attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    EscapePressed,
}

/// Source of selection input events. `None` means the input stream ended
/// without the user finishing the selection.
#[async_trait]
pub trait SelectionEventSource: Send + Sync {
    async fn next_event(&self) -> Option<SelectionEvent>;
}

/// The dimmed full-viewport overlay with a live cutout rectangle. The
/// selector drives it; removal on the cancellation path is the caller's
/// responsibility.
pub trait SelectionOverlay: Send + Sync {
    fn show(&self, viewport: Viewport);
    fn update_cutout(&self, region: Region);
    fn remove(&self);
}
