use anyhow::Result;

/// Whole-text markup transform (minifier or pretty-printer). The output
/// is valid markup without any transform applied, so a transform failure
/// is never fatal to a capture.
pub trait MarkupTransform: Send + Sync {
    fn transform(&self, markup: &str) -> Result<String>;
}
