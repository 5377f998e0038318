use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the page/tab instance a capture session is scoped to.
/// Sessions on distinct surfaces never interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}
