use anyhow::Result;

pub trait ClipboardPort: Send + Sync {
    fn copy_text(&self, text: String) -> Result<()>;
}
