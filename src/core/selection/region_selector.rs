//! Interactive region selection. A small state machine over pointer and
//! keyboard events: Idle → AwaitingDrag → Dragging → Resolved|Cancelled.

use crate::core::interfaces::ports::{SelectionEvent, SelectionEventSource, SelectionOverlay};
use crate::core::models::{Region, Viewport};
use crate::global_constants::LOG_TAG_SELECTOR;

/// Escape was pressed, or the input stream ended before a selection was
/// made. Overlay cleanup on this path belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCancelled;

enum SelectorState {
    AwaitingDrag,
    Dragging { anchor: (f64, f64), current: Region },
}

pub struct RegionSelector<'a> {
    overlay: &'a dyn SelectionOverlay,
    events: &'a dyn SelectionEventSource,
}

impl<'a> RegionSelector<'a> {
    pub fn new(overlay: &'a dyn SelectionOverlay, events: &'a dyn SelectionEventSource) -> Self {
        Self { overlay, events }
    }

    /// Runs one selection attempt to completion. The overlay starts with
    /// a zero-size cutout and follows every pointer move without
    /// debounce; pointer-up resolves with the current rectangle and
    /// removes the overlay.
    pub async fn select(&self, viewport: Viewport) -> Result<Region, SelectionCancelled> {
        log::debug!(
            "{} showing overlay for {}x{} viewport",
            LOG_TAG_SELECTOR,
            viewport.width,
            viewport.height
        );
        self.overlay.show(viewport);

        let mut state = SelectorState::AwaitingDrag;

        loop {
            let event = match self.events.next_event().await {
                Some(event) => event,
                None => {
                    log::warn!("{} input ended mid-selection", LOG_TAG_SELECTOR);
                    return Err(SelectionCancelled);
                }
            };

            match event {
                SelectionEvent::EscapePressed => {
                    log::info!("{} selection cancelled", LOG_TAG_SELECTOR);
                    return Err(SelectionCancelled);
                }
                SelectionEvent::PointerDown { x, y } => {
                    // Repeated presses during a drag carry no meaning.
                    if matches!(state, SelectorState::AwaitingDrag) {
                        let current = Region::zero_sized_at(x, y);
                        self.overlay.update_cutout(current);
                        state = SelectorState::Dragging {
                            anchor: (x, y),
                            current,
                        };
                    }
                }
                SelectionEvent::PointerMove { x, y } => {
                    if let SelectorState::Dragging { anchor, current } = &mut state {
                        *current = Region::from_drag(*anchor, (x, y));
                        self.overlay.update_cutout(*current);
                    }
                }
                SelectionEvent::PointerUp => {
                    // Releases before the drag starts are ignored.
                    if let SelectorState::Dragging { current, .. } = &state {
                        let region = *current;
                        self.overlay.remove();
                        log::info!("{} selection resolved: {:?}", LOG_TAG_SELECTOR, region);
                        return Ok(region);
                    }
                }
            }
        }
    }
}
