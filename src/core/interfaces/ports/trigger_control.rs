use crate::core::models::SurfaceId;

/// Enables/disables the capture trigger for one surface. Lives in the
/// privileged context; driven exclusively by the `started`/`finished`
/// session notifications.
pub trait TriggerControl: Send + Sync {
    fn disable(&self, surface: SurfaceId);
    fn enable(&self, surface: SurfaceId);
    fn is_enabled(&self, surface: SurfaceId) -> bool;
}
