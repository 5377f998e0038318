use std::path::Path;

use anyhow::Result;

use crate::core::interfaces::ports::SurfaceOpener;

/// Opens the artifact with the system handler, detached from this
/// process so the new surface carries no link back to the source.
pub struct DetachedSurfaceOpener;

impl SurfaceOpener for DetachedSurfaceOpener {
    fn open_detached(&self, path: &Path) -> Result<()> {
        open::that_detached(path)?;
        Ok(())
    }
}
