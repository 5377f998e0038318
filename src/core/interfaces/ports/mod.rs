mod clipboard;
mod copy_confirmation;
mod page_chrome;
mod selection_overlay;
mod styled_host;
mod surface_opener;
mod trigger_control;

pub use clipboard::ClipboardPort;
pub use copy_confirmation::{CopyAction, CopyConfirmation};
pub use page_chrome::{CursorStyle, PageChrome};
pub use selection_overlay::{SelectionEvent, SelectionEventSource, SelectionOverlay};
pub use styled_host::{AttachedFragment, StyledHost};
pub use surface_opener::SurfaceOpener;
pub use trigger_control::TriggerControl;
