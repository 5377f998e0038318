//! Per-surface session guard. At most one capture may be in flight per
//! capturing surface; the registry slot is taken on entry and given back
//! when the guard drops, so release happens on every exit path.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::core::models::SurfaceId;
use crate::global_constants::LOG_TAG_ORCHESTRATOR;

#[derive(Default)]
pub struct SessionRegistry {
    active: Mutex<HashSet<SurfaceId>>,
}

impl SessionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claims the surface's session slot; `None` when a capture is
    /// already active there.
    pub fn try_begin(self: &Arc<Self>, surface: SurfaceId) -> Option<SessionGuard> {
        let mut active = self.active.lock().expect("session registry poisoned");
        if !active.insert(surface) {
            log::warn!(
                "{} rejecting re-entrant capture on {}",
                LOG_TAG_ORCHESTRATOR,
                surface
            );
            return None;
        }

        Some(SessionGuard {
            registry: Arc::clone(self),
            surface,
        })
    }

    #[allow(dead_code)]
    pub fn is_active(&self, surface: SurfaceId) -> bool {
        self.active
            .lock()
            .expect("session registry poisoned")
            .contains(&surface)
    }
}

pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    surface: SurfaceId,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry
            .active
            .lock()
            .expect("session registry poisoned")
            .remove(&self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_capture_on_the_same_surface_is_rejected() {
        let registry = SessionRegistry::new();

        let guard = registry.try_begin(SurfaceId(1));
        assert!(guard.is_some());
        assert!(registry.try_begin(SurfaceId(1)).is_none());
    }

    #[test]
    fn test_distinct_surfaces_do_not_interfere() {
        let registry = SessionRegistry::new();

        let _first = registry.try_begin(SurfaceId(1)).unwrap();
        assert!(registry.try_begin(SurfaceId(2)).is_some());
    }

    #[test]
    fn test_dropping_the_guard_releases_the_slot() {
        let registry = SessionRegistry::new();

        let guard = registry.try_begin(SurfaceId(1)).unwrap();
        assert!(registry.is_active(SurfaceId(1)));

        drop(guard);
        assert!(!registry.is_active(SurfaceId(1)));
        assert!(registry.try_begin(SurfaceId(1)).is_some());
    }
}
