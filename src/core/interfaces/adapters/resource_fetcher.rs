use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Retrieves the bytes behind an external resource reference. The
/// unprivileged implementation is subject to the page's origin
/// restrictions; a proxy-backed implementation is not.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResource>;
}
