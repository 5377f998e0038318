use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineOutcome {
    pub inlined: usize,
    pub failed: usize,
}

/// Rewrites external resource references in the markup into embedded
/// data-URI form, in place. Best-effort per reference: a resource that
/// cannot be fetched is logged and left unresolved, never failing the
/// markup as a whole. An `Err` therefore signals a wholesale breakdown,
/// not a missing resource.
#[async_trait]
pub trait ResourceInliner: Send + Sync {
    async fn inline(&self, markup: &mut String) -> Result<InlineOutcome>;
}
