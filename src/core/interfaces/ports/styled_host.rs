use anyhow::Result;

/// A markup fragment temporarily attached to a live, styled document so
/// computed-style queries resolve during post-processing. Implementations
/// detach on drop, so the attach window closes on every path, including
/// inliner failure.
pub trait AttachedFragment: Send {
    fn markup(&self) -> &str;
    fn markup_mut(&mut self) -> &mut String;
    /// Serializes the (possibly rewritten) fragment back to text.
    fn serialize(&self) -> String;
}

pub trait StyledHost: Send + Sync {
    fn attach(&self, markup: String) -> Result<Box<dyn AttachedFragment>>;
}
