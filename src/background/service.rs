//! Privileged-context service. It sees no page content; it only answers
//! proxy requests: trigger control for session signaling, cross-origin
//! fetches, and style-dependent post-processing.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;

use crate::core::interfaces::adapters::{NetworkGateway, ResourceInliner};
use crate::core::interfaces::ports::{StyledHost, TriggerControl};
use crate::core::models::SurfaceId;
use crate::global_constants::LOG_TAG_BACKGROUND;
use crate::messaging::{
    BackgroundSideChannel, EncodedBinary, FetchReply, FetchRequest, ProxyReply, ProxyRequest,
    RequestFrame, ResponseFrame,
};

pub struct BackgroundService {
    trigger_control: Arc<dyn TriggerControl>,
    gateway: Arc<dyn NetworkGateway>,
    styled_host: Arc<dyn StyledHost>,
    inliner: Arc<dyn ResourceInliner>,
}

impl BackgroundService {
    pub fn build(
        trigger_control: Arc<dyn TriggerControl>,
        gateway: Arc<dyn NetworkGateway>,
        styled_host: Arc<dyn StyledHost>,
        inliner: Arc<dyn ResourceInliner>,
    ) -> Self {
        Self {
            trigger_control,
            gateway,
            styled_host,
            inliner,
        }
    }

    pub fn spawn(self, channel: BackgroundSideChannel) -> JoinHandle<()> {
        tokio::spawn(Arc::new(self).run(channel))
    }

    async fn run(self: Arc<Self>, mut channel: BackgroundSideChannel) {
        log::info!("{} service listening", LOG_TAG_BACKGROUND);

        while let Some(encoded) = channel.incoming.recv().await {
            let frame: RequestFrame = match serde_json::from_str(&encoded) {
                Ok(frame) => frame,
                Err(error) => {
                    log::error!(
                        "{} dropping unparseable request: {}",
                        LOG_TAG_BACKGROUND,
                        error
                    );
                    continue;
                }
            };

            // Independent requests may overlap; the correlation id keeps
            // replies matched regardless of completion order.
            let service = Arc::clone(&self);
            let outgoing = channel.outgoing.clone();
            tokio::spawn(async move {
                let reply = service.handle(frame.surface, frame.request).await;
                let response = ResponseFrame {
                    id: frame.id,
                    reply,
                };
                match serde_json::to_string(&response) {
                    Ok(encoded) => {
                        if outgoing.send(encoded).await.is_err() {
                            log::warn!(
                                "{} page side went away before reply {}",
                                LOG_TAG_BACKGROUND,
                                frame.id
                            );
                        }
                    }
                    Err(error) => {
                        log::error!("{} failed to encode reply: {}", LOG_TAG_BACKGROUND, error);
                    }
                }
            });
        }

        log::info!("{} request channel closed, service stopping", LOG_TAG_BACKGROUND);
    }

    async fn handle(&self, surface: SurfaceId, request: ProxyRequest) -> ProxyReply {
        match request {
            ProxyRequest::Started => {
                log::info!("{} session started on {}", LOG_TAG_BACKGROUND, surface);
                self.trigger_control.disable(surface);
                ProxyReply::ok()
            }
            ProxyRequest::Finished => {
                log::info!("{} session finished on {}", LOG_TAG_BACKGROUND, surface);
                self.trigger_control.enable(surface);
                ProxyReply::ok()
            }
            ProxyRequest::Fetch(fetch) => match self.perform_fetch(fetch).await {
                Ok(reply) => ProxyReply::Fetch(reply),
                Err(error) => {
                    log::warn!("{} fetch failed: {}", LOG_TAG_BACKGROUND, error);
                    ProxyReply::error(error.to_string())
                }
            },
            ProxyRequest::PostProcess { markup } => match self.post_process(markup).await {
                Ok(markup) => ProxyReply::PostProcess { markup },
                Err(error) => {
                    log::warn!("{} post-process failed: {}", LOG_TAG_BACKGROUND, error);
                    ProxyReply::error(error.to_string())
                }
            },
        }
    }

    async fn perform_fetch(&self, request: FetchRequest) -> Result<FetchReply> {
        log::debug!("{} fetching {}", LOG_TAG_BACKGROUND, request.url);

        let response = self
            .gateway
            .perform(
                &request.url,
                request.options.method.as_deref(),
                &request.options.headers,
            )
            .await?;

        Ok(FetchReply {
            status: response.status,
            status_text: response.status_text,
            headers: response.headers,
            body: EncodedBinary::from_bytes(&response.body),
            content_type: response.content_type,
        })
    }

    /// The fragment stays attached only for the duration of the inliner
    /// run; dropping it detaches, also when inlining fails.
    async fn post_process(&self, markup: String) -> Result<String> {
        let mut fragment = self.styled_host.attach(markup)?;
        self.inliner.inline(fragment.markup_mut()).await?;
        Ok(fragment.serialize())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::core::interfaces::adapters::{GatewayResponse, InlineOutcome};
    use crate::core::interfaces::ports::AttachedFragment;
    use crate::messaging::{create_channel_pair, BackgroundProxy, FetchOptions};

    #[derive(Default)]
    struct RecordingTriggerControl {
        disabled: Mutex<Vec<SurfaceId>>,
        enabled: Mutex<Vec<SurfaceId>>,
    }

    impl TriggerControl for RecordingTriggerControl {
        fn disable(&self, surface: SurfaceId) {
            self.disabled.lock().unwrap().push(surface);
        }

        fn enable(&self, surface: SurfaceId) {
            self.enabled.lock().unwrap().push(surface);
        }

        fn is_enabled(&self, surface: SurfaceId) -> bool {
            let disabled = self.disabled.lock().unwrap().iter().filter(|s| **s == surface).count();
            let enabled = self.enabled.lock().unwrap().iter().filter(|s| **s == surface).count();
            enabled >= disabled
        }
    }

    struct StaticGateway {
        body: Vec<u8>,
    }

    #[async_trait]
    impl NetworkGateway for StaticGateway {
        async fn perform(
            &self,
            _url: &str,
            _method: Option<&str>,
            _headers: &BTreeMap<String, String>,
        ) -> Result<GatewayResponse> {
            Ok(GatewayResponse {
                status: 200,
                status_text: "OK".to_string(),
                headers: BTreeMap::new(),
                body: self.body.clone(),
                content_type: "application/octet-stream".to_string(),
            })
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl NetworkGateway for FailingGateway {
        async fn perform(
            &self,
            url: &str,
            _method: Option<&str>,
            _headers: &BTreeMap<String, String>,
        ) -> Result<GatewayResponse> {
            anyhow::bail!("network unreachable: {}", url)
        }
    }

    struct CountingFragment {
        markup: String,
        attached: Arc<AtomicUsize>,
    }

    impl AttachedFragment for CountingFragment {
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

    impl Drop for CountingFragment {
        fn drop(&mut self) {
            self.attached.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct CountingHost {
        attached: Arc<AtomicUsize>,
    }

    impl StyledHost for CountingHost {
        fn attach(&self, markup: String) -> Result<Box<dyn AttachedFragment>> {
            self.attached.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingFragment {
                markup,
                attached: Arc::clone(&self.attached),
            }))
        }
    }

    struct UppercasingInliner;

    #[async_trait]
    impl ResourceInliner for UppercasingInliner {
        async fn inline(&self, markup: &mut String) -> Result<InlineOutcome> {
            *markup = markup.to_uppercase();
            Ok(InlineOutcome {
                inlined: 1,
                failed: 0,
            })
        }
    }

    struct BrokenInliner;

    #[async_trait]
    impl ResourceInliner for BrokenInliner {
        async fn inline(&self, _markup: &mut String) -> Result<InlineOutcome> {
            anyhow::bail!("inliner exploded")
        }
    }

    struct ServiceFixture {
        proxy: Arc<BackgroundProxy>,
        trigger_control: Arc<RecordingTriggerControl>,
        attached: Arc<AtomicUsize>,
    }

    fn start_service(
        gateway: Arc<dyn NetworkGateway>,
        inliner: Arc<dyn ResourceInliner>,
    ) -> ServiceFixture {
        let trigger_control = Arc::new(RecordingTriggerControl::default());
        let host = Arc::new(CountingHost::default());
        let attached = Arc::clone(&host.attached);

        let service = BackgroundService::build(
            Arc::clone(&trigger_control) as Arc<dyn TriggerControl>,
            gateway,
            host,
            inliner,
        );

        let (page, background) = create_channel_pair(8);
        service.spawn(background);

        ServiceFixture {
            proxy: BackgroundProxy::connect(SurfaceId(7), page),
            trigger_control,
            attached,
        }
    }

    #[tokio::test]
    async fn test_started_and_finished_toggle_the_trigger_control() {
        let fixture = start_service(
            Arc::new(StaticGateway { body: vec![] }),
            Arc::new(UppercasingInliner),
        );

        fixture.proxy.notify_started().await.unwrap();
        assert!(!fixture.trigger_control.is_enabled(SurfaceId(7)));

        fixture.proxy.notify_finished().await.unwrap();
        assert!(fixture.trigger_control.is_enabled(SurfaceId(7)));
    }

    #[tokio::test]
    async fn test_fetch_encodes_the_body_for_the_transport_hop() {
        let body = vec![0u8, 1, 2, 250, 251, 252];
        let fixture = start_service(
            Arc::new(StaticGateway { body: body.clone() }),
            Arc::new(UppercasingInliner),
        );

        let reply = fixture
            .proxy
            .fetch(FetchRequest {
                url: "https://other-origin.example/image.png".to_string(),
                options: FetchOptions::default(),
            })
            .await
            .unwrap();

        assert_eq!(reply.body.decode().unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_a_structured_error_reply() {
        let fixture = start_service(Arc::new(FailingGateway), Arc::new(UppercasingInliner));

        let error = fixture
            .proxy
            .fetch(FetchRequest {
                url: "https://unreachable.invalid/".to_string(),
                options: FetchOptions::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            crate::core::error::CaptureError::Proxy(message)
                if message.contains("network unreachable")
        ));
    }

    #[tokio::test]
    async fn test_post_process_runs_the_inliner_against_an_attached_fragment() {
        let fixture = start_service(
            Arc::new(StaticGateway { body: vec![] }),
            Arc::new(UppercasingInliner),
        );

        let markup = fixture
            .proxy
            .post_process("<svg>body</svg>".to_string())
            .await
            .unwrap();

        assert_eq!(markup, "<SVG>BODY</SVG>");
        assert_eq!(fixture.attached.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_process_detaches_even_when_the_inliner_fails() {
        let fixture = start_service(
            Arc::new(StaticGateway { body: vec![] }),
            Arc::new(BrokenInliner),
        );

        let error = fixture
            .proxy
            .post_process("<svg/>".to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, crate::core::error::CaptureError::Proxy(_)));
        assert_eq!(fixture.attached.load(Ordering::SeqCst), 0);
    }
}
