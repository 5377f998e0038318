#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Wait,
    Crosshair,
}

/// Transient mutations of the live page (cursor changes). Every mutation
/// is restored on every exit path of a capture.
pub trait PageChrome: Send + Sync {
    fn set_cursor(&self, style: CursorStyle);
    fn reset_cursor(&self);
}
