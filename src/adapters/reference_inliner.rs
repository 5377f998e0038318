//! Rewrites external `href`/`src` attributes and `url(...)` style
//! references into data URIs so the artifact carries its resources with
//! it.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::interfaces::adapters::{InlineOutcome, ResourceFetcher, ResourceInliner};
use crate::global_constants::LOG_TAG_INLINER;

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:href|src)="(https?://[^"]+)"|url\((https?://[^)\s"']+)\)"#)
        .expect("reference pattern must compile")
});

pub struct ReferenceInliner {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl ReferenceInliner {
    pub fn build(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    fn external_references(markup: &str) -> BTreeSet<String> {
        REFERENCE_PATTERN
            .captures_iter(markup)
            .filter_map(|captures| {
                captures
                    .get(1)
                    .or_else(|| captures.get(2))
                    .map(|matched| matched.as_str().to_string())
            })
            .collect()
    }
}

#[async_trait]
impl ResourceInliner for ReferenceInliner {
    /// Best-effort per reference: a resource that cannot be fetched is
    /// logged and its reference left unresolved.
    async fn inline(&self, markup: &mut String) -> Result<InlineOutcome> {
        let references = Self::external_references(markup);
        let mut outcome = InlineOutcome::default();

        for url in references {
            match self.fetcher.fetch(&url).await {
                Ok(resource) => {
                    let data_uri = format!(
                        "data:{};base64,{}",
                        resource.content_type,
                        base64::engine::general_purpose::STANDARD.encode(&resource.bytes)
                    );
                    *markup = markup.replace(&url, &data_uri);
                    outcome.inlined += 1;
                }
                Err(error) => {
                    log::warn!(
                        "{} leaving {} unresolved: {}",
                        LOG_TAG_INLINER,
                        url,
                        error
                    );
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }
}
