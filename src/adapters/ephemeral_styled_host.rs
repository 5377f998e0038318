//! Styled host the post-process step attaches fragments to. The attach
//! window is scoped to the fragment's lifetime; dropping it detaches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;

use crate::core::interfaces::ports::{AttachedFragment, StyledHost};
use crate::global_constants::LOG_TAG_BACKGROUND;

#[derive(Default)]
pub struct EphemeralStyledHost {
    attached: Arc<AtomicUsize>,
}

impl EphemeralStyledHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn attached_count(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }
}

impl StyledHost for EphemeralStyledHost {
    fn attach(&self, markup: String) -> Result<Box<dyn AttachedFragment>> {
        if !markup.trim_start().starts_with('<') {
            anyhow::bail!("payload is not markup");
        }

        self.attached.fetch_add(1, Ordering::SeqCst);
        log::debug!(
            "{} fragment attached ({} live)",
            LOG_TAG_BACKGROUND,
            self.attached.load(Ordering::SeqCst)
        );

        Ok(Box::new(EphemeralFragment {
            markup,
            attached: Arc::clone(&self.attached),
        }))
    }
}

struct EphemeralFragment {
    markup: String,
    attached: Arc<AtomicUsize>,
}

impl AttachedFragment for EphemeralFragment {
    fn markup(&self) -> &str {
        &self.markup
    }

    fn markup_mut(&mut self) -> &mut String {
        &mut self.markup
    }

    fn serialize(&self) -> String {
        self.markup.clone()
    }
}

impl Drop for EphemeralFragment {
    fn drop(&mut self) {
        self.attached.fetch_sub(1, Ordering::SeqCst);
        log::debug!("{} fragment detached", LOG_TAG_BACKGROUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_detaches_when_dropped() {
        let host = EphemeralStyledHost::new();

        let fragment = host.attach("<svg/>".to_string()).unwrap();
        assert_eq!(host.attached_count(), 1);

        drop(fragment);
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn test_serialize_reflects_in_place_edits() {
        let host = EphemeralStyledHost::new();

        let mut fragment = host.attach("<svg>old</svg>".to_string()).unwrap();
        *fragment.markup_mut() = "<svg>new</svg>".to_string();

        assert_eq!(fragment.serialize(), "<svg>new</svg>");
    }

    #[test]
    fn test_non_markup_payloads_are_rejected() {
        let host = EphemeralStyledHost::new();

        assert!(host.attach("plain text".to_string()).is_err());
        assert_eq!(host.attached_count(), 0);
    }
}
