use anyhow::Result;

use crate::core::models::{PageDocument, Region};

#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Restrict the capture to this viewport rectangle; `None` captures
    /// the full document.
    pub region: Option<Region>,
    /// Preserve hyperlinks in the produced markup.
    pub keep_links: bool,
}

/// Converts the rendered document tree into SVG markup. Consumed by the
/// pipeline as a black box.
pub trait DocumentSerializer: Send + Sync {
    fn serialize(&self, document: &PageDocument, options: &SerializeOptions) -> Result<String>;
}
