use std::sync::Mutex;

use crate::core::interfaces::ports::SelectionOverlay;
use crate::core::models::{Region, Viewport};
use crate::global_constants::LOG_TAG_SELECTOR;

/// Headless rendition of the dimmed selection overlay: it keeps the
/// visible state and the live cutout so callers can observe what a real
/// presenter would draw.
#[derive(Default)]
pub struct OverlayPresenter {
    state: Mutex<OverlayState>,
}

#[derive(Default)]
struct OverlayState {
    visible: bool,
    cutout: Option<Region>,
}

impl OverlayPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn is_visible(&self) -> bool {
        self.state.lock().expect("overlay state poisoned").visible
    }

    #[allow(dead_code)]
    pub fn current_cutout(&self) -> Option<Region> {
        self.state.lock().expect("overlay state poisoned").cutout
    }
}

impl SelectionOverlay for OverlayPresenter {
    fn show(&self, viewport: Viewport) {
        log::info!(
            "{} overlay shown over {}x{}, cutout zero-sized",
            LOG_TAG_SELECTOR,
            viewport.width,
            viewport.height
        );
        let mut state = self.state.lock().expect("overlay state poisoned");
        state.visible = true;
        state.cutout = None;
    }

    fn update_cutout(&self, region: Region) {
        let mut state = self.state.lock().expect("overlay state poisoned");
        state.cutout = Some(region);
    }

    fn remove(&self) {
        log::info!("{} overlay removed", LOG_TAG_SELECTOR);
        let mut state = self.state.lock().expect("overlay state poisoned");
        state.visible = false;
        state.cutout = None;
    }
}
