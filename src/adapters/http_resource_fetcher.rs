//! Resource fetchers for the inliner. The unprivileged page fetcher is
//! origin-bound; the proxied fetcher rides the message channel; the
//! fallback fetcher tries the former first and transparently retries via
//! the latter.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::core::interfaces::adapters::{FetchedResource, ResourceFetcher};
use crate::global_constants::LOG_TAG_INLINER;
use crate::messaging::{BackgroundProxy, FetchOptions, FetchRequest};

pub struct HttpResourceFetcher {
    client: reqwest::Client,
    allowed_origin: Option<reqwest::Url>,
}

impl HttpResourceFetcher {
    /// Page-context fetcher: only same-origin requests are allowed, the
    /// way the embedding page is restricted.
    pub fn same_origin_only(page_origin: &str) -> Result<Self> {
        let origin = reqwest::Url::parse(page_origin)
            .with_context(|| format!("invalid page origin: {}", page_origin))?;

        Ok(Self {
            client: reqwest::Client::new(),
            allowed_origin: Some(origin),
        })
    }

    /// Privileged-context fetcher without origin restrictions.
    pub fn unrestricted() -> Self {
        Self {
            client: reqwest::Client::new(),
            allowed_origin: None,
        }
    }
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        let parsed = reqwest::Url::parse(url).with_context(|| format!("invalid url: {}", url))?;

        if let Some(allowed) = &self.allowed_origin {
            if parsed.origin() != allowed.origin() {
                anyhow::bail!("cross-origin fetch blocked: {}", url);
            }
        }

        let response = self.client.get(parsed).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("fetch of {} returned {}", url, response.status());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedResource {
            bytes,
            content_type,
        })
    }
}

/// Fetcher that performs the request in the privileged context and
/// decodes the transported body immediately on receipt.
pub struct ProxiedResourceFetcher {
    proxy: Arc<BackgroundProxy>,
}

impl ProxiedResourceFetcher {
    pub fn build(proxy: Arc<BackgroundProxy>) -> Self {
        Self { proxy }
    }
}

#[async_trait]
impl ResourceFetcher for ProxiedResourceFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        let reply = self
            .proxy
            .fetch(FetchRequest {
                url: url.to_string(),
                options: FetchOptions::default(),
            })
            .await?;

        if reply.status >= 400 {
            anyhow::bail!(
                "proxied fetch of {} returned {} {}",
                url,
                reply.status,
                reply.status_text
            );
        }

        Ok(FetchedResource {
            bytes: reply.body.decode()?,
            content_type: reply.content_type,
        })
    }
}

pub struct FallbackResourceFetcher {
    local: Arc<dyn ResourceFetcher>,
    proxied: Arc<dyn ResourceFetcher>,
}

impl FallbackResourceFetcher {
    pub fn build(local: Arc<dyn ResourceFetcher>, proxied: Arc<dyn ResourceFetcher>) -> Self {
        Self { local, proxied }
    }
}

#[async_trait]
impl ResourceFetcher for FallbackResourceFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource> {
        match self.local.fetch(url).await {
            Ok(resource) => Ok(resource),
            Err(error) => {
                log::debug!(
                    "{} local fetch of {} failed ({}), retrying via proxy",
                    LOG_TAG_INLINER,
                    url,
                    error
                );
                self.proxied.fetch(url).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::models::SurfaceId;
    use crate::messaging::{
        create_channel_pair, EncodedBinary, FetchReply, ProxyReply, ProxyRequest, RequestFrame,
        ResponseFrame,
    };

    struct CountingFetcher {
        calls: AtomicUsize,
        result: Result<FetchedResource, String>,
    }

    impl CountingFetcher {
        fn succeeding(content: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Ok(FetchedResource {
                    bytes: content.as_bytes().to_vec(),
                    content_type: "text/plain".to_string(),
                }),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl ResourceFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedResource> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(resource) => Ok(resource.clone()),
                Err(message) => anyhow::bail!("{}", message),
            }
        }
    }

    #[tokio::test]
    async fn test_same_origin_fetcher_blocks_cross_origin_urls() {
        let fetcher = HttpResourceFetcher::same_origin_only("https://example.com").unwrap();

        let error = fetcher
            .fetch("https://other-origin.example/pic.png")
            .await
            .unwrap_err();

        assert!(error.to_string().contains("cross-origin fetch blocked"));
    }

    #[tokio::test]
    async fn test_fallback_prefers_the_local_fetcher() {
        let local = Arc::new(CountingFetcher::succeeding("local"));
        let proxied = Arc::new(CountingFetcher::succeeding("proxied"));
        let fallback = FallbackResourceFetcher::build(
            Arc::clone(&local) as Arc<dyn ResourceFetcher>,
            Arc::clone(&proxied) as Arc<dyn ResourceFetcher>,
        );

        let resource = fallback.fetch("https://example.com/a").await.unwrap();

        assert_eq!(resource.bytes, b"local");
        assert_eq!(proxied.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_retries_via_proxy_when_local_fetch_fails() {
        let local = Arc::new(CountingFetcher::failing("cross-origin fetch blocked"));
        let proxied = Arc::new(CountingFetcher::succeeding("proxied"));
        let fallback = FallbackResourceFetcher::build(
            Arc::clone(&local) as Arc<dyn ResourceFetcher>,
            Arc::clone(&proxied) as Arc<dyn ResourceFetcher>,
        );

        let resource = fallback.fetch("https://third-party.example/b").await.unwrap();

        assert_eq!(resource.bytes, b"proxied");
        assert_eq!(local.calls.load(Ordering::SeqCst), 1);
        assert_eq!(proxied.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_proxied_fetcher_decodes_the_transported_body() {
        let (page, mut background) = create_channel_pair(4);

        tokio::spawn(async move {
            while let Some(encoded) = background.incoming.recv().await {
                let frame: RequestFrame = serde_json::from_str(&encoded).unwrap();
                let reply = match frame.request {
                    ProxyRequest::Fetch(_) => ProxyReply::Fetch(FetchReply {
                        status: 200,
                        status_text: "OK".to_string(),
                        headers: Default::default(),
                        body: EncodedBinary::from_bytes(b"\x00\x01binary"),
                        content_type: "image/png".to_string(),
                    }),
                    _ => ProxyReply::ok(),
                };
                let encoded =
                    serde_json::to_string(&ResponseFrame { id: frame.id, reply }).unwrap();
                let _ = background.outgoing.send(encoded).await;
            }
        });

        let proxy = BackgroundProxy::connect(SurfaceId(1), page);
        let fetcher = ProxiedResourceFetcher::build(proxy);

        let resource = fetcher.fetch("https://cdn.example.net/p.png").await.unwrap();

        assert_eq!(resource.bytes, b"\x00\x01binary");
        assert_eq!(resource.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_proxied_fetcher_treats_http_errors_as_failures() {
        let (page, mut background) = create_channel_pair(4);

        tokio::spawn(async move {
            while let Some(encoded) = background.incoming.recv().await {
                let frame: RequestFrame = serde_json::from_str(&encoded).unwrap();
                let reply = ProxyReply::Fetch(FetchReply {
                    status: 404,
                    status_text: "Not Found".to_string(),
                    headers: Default::default(),
                    body: EncodedBinary::from_bytes(b""),
                    content_type: "text/html".to_string(),
                });
                let encoded =
                    serde_json::to_string(&ResponseFrame { id: frame.id, reply }).unwrap();
                let _ = background.outgoing.send(encoded).await;
            }
        });

        let proxy = BackgroundProxy::connect(SurfaceId(1), page);
        let fetcher = ProxiedResourceFetcher::build(proxy);

        let error = fetcher
            .fetch("https://cdn.example.net/gone.png")
            .await
            .unwrap_err();

        assert!(error.to_string().contains("404"));
    }
}
