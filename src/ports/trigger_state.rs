use std::collections::HashSet;
use std::sync::Mutex;

use crate::core::interfaces::ports::TriggerControl;
use crate::core::models::SurfaceId;
use crate::global_constants::LOG_TAG_BACKGROUND;

/// Privileged-side trigger state: a surface's capture control is enabled
/// unless a session currently holds it disabled.
#[derive(Default)]
pub struct InMemoryTriggerControl {
    disabled: Mutex<HashSet<SurfaceId>>,
}

impl InMemoryTriggerControl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TriggerControl for InMemoryTriggerControl {
    fn disable(&self, surface: SurfaceId) {
        log::info!("{} trigger disabled for {}", LOG_TAG_BACKGROUND, surface);
        self.disabled
            .lock()
            .expect("trigger state poisoned")
            .insert(surface);
    }

    fn enable(&self, surface: SurfaceId) {
        log::info!("{} trigger enabled for {}", LOG_TAG_BACKGROUND, surface);
        self.disabled
            .lock()
            .expect("trigger state poisoned")
            .remove(&surface);
    }

    fn is_enabled(&self, surface: SurfaceId) -> bool {
        !self
            .disabled
            .lock()
            .expect("trigger state poisoned")
            .contains(&surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_start_enabled() {
        let control = InMemoryTriggerControl::new();
        assert!(control.is_enabled(SurfaceId(1)));
    }

    #[test]
    fn test_disable_affects_only_the_given_surface() {
        let control = InMemoryTriggerControl::new();

        control.disable(SurfaceId(1));

        assert!(!control.is_enabled(SurfaceId(1)));
        assert!(control.is_enabled(SurfaceId(2)));

        control.enable(SurfaceId(1));
        assert!(control.is_enabled(SurfaceId(1)));
    }
}
