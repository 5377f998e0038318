//! Wires the two contexts together: spawns the privileged background
//! service, connects the page-side proxy over the message channel, and
//! assembles the capture orchestrator with its adapters and ports.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::adapters::{
    DetachedSurfaceOpener, EphemeralStyledHost, FallbackResourceFetcher, HttpNetworkGateway,
    HttpResourceFetcher, MarkupMinifier, MarkupPrettyPrinter, ProxiedResourceFetcher,
    ReferenceInliner, SvgTreeSerializer, SystemClipboard,
};
use crate::background::BackgroundService;
use crate::core::dispatch::OutputDispatcher;
use crate::core::interfaces::adapters::{ResourceFetcher, SettingsStore};
use crate::core::interfaces::ports::{SelectionEvent, TriggerControl};
use crate::core::models::{PageDocument, SurfaceId};
use crate::core::orchestrators::{CaptureOrchestrator, PagePorts, PipelineCollaborators};
use crate::core::session::SessionRegistry;
use crate::global_constants::{LOG_TAG_APP, PROXY_CHANNEL_CAPACITY};
use crate::messaging::{create_channel_pair, BackgroundProxy, CaptureRequest, CaptureResponse};
use crate::ports::{
    AutoConfirmingPrompt, ChannelSelectionSource, DocumentChrome, InMemoryTriggerControl,
    OverlayPresenter,
};

pub struct CaptureApp {
    surface: SurfaceId,
    orchestrator: CaptureOrchestrator,
    selection_input: mpsc::Sender<SelectionEvent>,
    trigger_control: Arc<InMemoryTriggerControl>,
}

impl CaptureApp {
    pub fn build(
        document: PageDocument,
        page_origin: &str,
        settings_store: Arc<dyn SettingsStore>,
        download_dir: PathBuf,
    ) -> Result<Self> {
        log::info!("{} initializing capture surfaces", LOG_TAG_APP);

        let surface = SurfaceId(1);
        let (page_channel, background_channel) = create_channel_pair(PROXY_CHANNEL_CAPACITY);

        // Privileged context: trigger control, unrestricted network, and
        // its own inliner for computed-style post-processing.
        let trigger_control = Arc::new(InMemoryTriggerControl::new());
        let background = BackgroundService::build(
            Arc::clone(&trigger_control) as Arc<dyn TriggerControl>,
            Arc::new(HttpNetworkGateway::build()),
            Arc::new(EphemeralStyledHost::new()),
            Arc::new(ReferenceInliner::build(Arc::new(
                HttpResourceFetcher::unrestricted(),
            ))),
        );
        background.spawn(background_channel);

        let proxy = BackgroundProxy::connect(surface, page_channel);

        // Page context: origin-bound fetches fall back to the proxy per
        // resource.
        let local_fetcher = Arc::new(HttpResourceFetcher::same_origin_only(page_origin)?);
        let proxied_fetcher = Arc::new(ProxiedResourceFetcher::build(Arc::clone(&proxy)));
        let page_fetcher = Arc::new(FallbackResourceFetcher::build(
            local_fetcher as Arc<dyn ResourceFetcher>,
            proxied_fetcher as Arc<dyn ResourceFetcher>,
        ));

        let collaborators = PipelineCollaborators {
            settings_store,
            serializer: Arc::new(SvgTreeSerializer::new()),
            inliner: Arc::new(ReferenceInliner::build(page_fetcher)),
            minifier: Arc::new(MarkupMinifier),
            pretty_printer: Arc::new(MarkupPrettyPrinter),
        };

        let (selection_input, selection_source) = ChannelSelectionSource::create();
        let ports = PagePorts {
            overlay: Arc::new(OverlayPresenter::new()),
            selection_events: Arc::new(selection_source),
            chrome: Arc::new(DocumentChrome::new()),
        };

        let dispatcher = OutputDispatcher::build(
            download_dir,
            Arc::new(SystemClipboard),
            Arc::new(AutoConfirmingPrompt),
            Arc::new(DetachedSurfaceOpener),
        );

        let orchestrator = CaptureOrchestrator::build(
            surface,
            Arc::new(document),
            SessionRegistry::new(),
            proxy,
            collaborators,
            ports,
            dispatcher,
        );

        Ok(Self {
            surface,
            orchestrator,
            selection_input,
            trigger_control,
        })
    }

    /// Entry point for the external capture trigger.
    pub async fn handle_capture_request(&self, request: CaptureRequest) -> CaptureResponse {
        match self.orchestrator.capture(request.area).await {
            Ok(()) => CaptureResponse::ok(),
            Err(error) => CaptureResponse::failed(error.to_string()),
        }
    }

    /// Sender half of the selection input; pointer and keyboard events
    /// pushed here drive the region selector.
    pub fn selection_input(&self) -> mpsc::Sender<SelectionEvent> {
        self.selection_input.clone()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_control.is_enabled(self.surface)
    }
}
