use std::path::Path;

use anyhow::Result;

/// Opens a temporary artifact object in a new display context, with no
/// opener linkage back to the captured document.
pub trait SurfaceOpener: Send + Sync {
    fn open_detached(&self, path: &Path) -> Result<()>;
}
