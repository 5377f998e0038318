use std::sync::Mutex;

use crate::core::interfaces::ports::{CursorStyle, PageChrome};
use crate::global_constants::LOG_TAG_APP;

/// Tracks the transient cursor override on the captured document.
#[derive(Default)]
pub struct DocumentChrome {
    cursor: Mutex<Option<CursorStyle>>,
}

impl DocumentChrome {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn current_cursor(&self) -> Option<CursorStyle> {
        *self.cursor.lock().expect("cursor state poisoned")
    }
}

impl PageChrome for DocumentChrome {
    fn set_cursor(&self, style: CursorStyle) {
        log::debug!("{} cursor set to {:?}", LOG_TAG_APP, style);
        *self.cursor.lock().expect("cursor state poisoned") = Some(style);
    }

    fn reset_cursor(&self) {
        log::debug!("{} cursor restored", LOG_TAG_APP);
        *self.cursor.lock().expect("cursor state poisoned") = None;
    }
}
