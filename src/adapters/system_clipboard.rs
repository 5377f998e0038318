use anyhow::Result;

use crate::core::interfaces::ports::ClipboardPort;

pub struct SystemClipboard;

impl ClipboardPort for SystemClipboard {
    fn copy_text(&self, text: String) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
