//! Top-level capture pipeline. One invocation owns the whole lifecycle
//! of a session: started/finished signaling, optional region selection,
//! serialization, inlining, post-processing and output dispatch.

use std::sync::Arc;

use crate::core::dispatch::OutputDispatcher;
use crate::core::error::CaptureError;
use crate::core::interfaces::adapters::{
    DocumentSerializer, MarkupTransform, ResourceInliner, SerializeOptions, SettingsStore,
};
use crate::core::interfaces::ports::{
    CursorStyle, PageChrome, SelectionEventSource, SelectionOverlay,
};
use crate::core::models::{Artifact, CaptureArea, CaptureSettings, PageDocument, Region, SurfaceId};
use crate::core::selection::{RegionSelector, SelectionCancelled};
use crate::core::session::SessionRegistry;
use crate::global_constants::LOG_TAG_ORCHESTRATOR;
use crate::messaging::BackgroundProxy;
use crate::utils::format_bytes;

/// Pipeline collaborators consumed as black boxes.
pub struct PipelineCollaborators {
    pub settings_store: Arc<dyn SettingsStore>,
    pub serializer: Arc<dyn DocumentSerializer>,
    pub inliner: Arc<dyn ResourceInliner>,
    pub minifier: Arc<dyn MarkupTransform>,
    pub pretty_printer: Arc<dyn MarkupTransform>,
}

/// Page-facing ports: the selection overlay, its input events, and the
/// transient page chrome mutations.
pub struct PagePorts {
    pub overlay: Arc<dyn SelectionOverlay>,
    pub selection_events: Arc<dyn SelectionEventSource>,
    pub chrome: Arc<dyn PageChrome>,
}

pub struct CaptureOrchestrator {
    surface: SurfaceId,
    document: Arc<PageDocument>,
    sessions: Arc<SessionRegistry>,
    proxy: Arc<BackgroundProxy>,
    collaborators: PipelineCollaborators,
    ports: PagePorts,
    dispatcher: OutputDispatcher,
}

impl CaptureOrchestrator {
    pub fn build(
        surface: SurfaceId,
        document: Arc<PageDocument>,
        sessions: Arc<SessionRegistry>,
        proxy: Arc<BackgroundProxy>,
        collaborators: PipelineCollaborators,
        ports: PagePorts,
        dispatcher: OutputDispatcher,
    ) -> Self {
        Self {
            surface,
            document,
            sessions,
            proxy,
            collaborators,
            ports,
            dispatcher,
        }
    }

    /// Runs one capture. `started` is sent before any work and
    /// `finished` after all work on every exit path, including error and
    /// cancellation; the session slot is held for exactly that window.
    pub async fn capture(&self, area: CaptureArea) -> Result<(), CaptureError> {
        let _session = self
            .sessions
            .try_begin(self.surface)
            .ok_or(CaptureError::SessionActive)?;

        log::info!(
            "{} starting capture on {} ({:?})",
            LOG_TAG_ORCHESTRATOR,
            self.surface,
            area
        );

        self.proxy.notify_started().await?;

        let result = self.run_pipeline(area).await;

        if let Err(error) = self.proxy.notify_finished().await {
            log::error!(
                "{} finish notification failed: {}",
                LOG_TAG_ORCHESTRATOR,
                error
            );
        }

        match &result {
            Ok(()) => log::info!("{} capture complete", LOG_TAG_ORCHESTRATOR),
            Err(error) if error.is_cancellation() => {
                log::info!("{} capture cancelled by the user", LOG_TAG_ORCHESTRATOR)
            }
            Err(error) => log::warn!("{} capture failed: {}", LOG_TAG_ORCHESTRATOR, error),
        }

        result
    }

    async fn run_pipeline(&self, area: CaptureArea) -> Result<(), CaptureError> {
        let region = self.resolve_region(area).await?;

        self.ports.chrome.set_cursor(CursorStyle::Wait);
        let outcome = self.run_capture_steps(region).await;
        self.ports.chrome.reset_cursor();

        outcome
    }

    async fn resolve_region(&self, area: CaptureArea) -> Result<Option<Region>, CaptureError> {
        match area {
            CaptureArea::FullDocument => Ok(None),
            CaptureArea::UserSelectedRegion => {
                let selector = RegionSelector::new(
                    self.ports.overlay.as_ref(),
                    self.ports.selection_events.as_ref(),
                );

                self.ports.chrome.set_cursor(CursorStyle::Crosshair);
                let outcome = selector.select(self.document.viewport).await;
                self.ports.chrome.reset_cursor();

                match outcome {
                    Ok(region) => Ok(Some(region)),
                    Err(SelectionCancelled) => {
                        // The selector leaves the overlay up on this path.
                        self.ports.overlay.remove();
                        Err(CaptureError::UserCancelled)
                    }
                }
            }
        }
    }

    async fn run_capture_steps(&self, region: Option<Region>) -> Result<(), CaptureError> {
        let settings = CaptureSettings::load(self.collaborators.settings_store.as_ref()).await?;

        let options = SerializeOptions {
            region,
            keep_links: settings.keep_links,
        };
        let mut markup = self
            .collaborators
            .serializer
            .serialize(&self.document, &options)
            .map_err(|error| CaptureError::Serialization(error.to_string()))?;

        if settings.inline_resources {
            match self.collaborators.inliner.inline(&mut markup).await {
                Ok(outcome) => log::info!(
                    "{} inlined {} resources locally, {} left unresolved",
                    LOG_TAG_ORCHESTRATOR,
                    outcome.inlined,
                    outcome.failed
                ),
                Err(error) => log::warn!(
                    "{} local inlining skipped: {}",
                    LOG_TAG_ORCHESTRATOR,
                    error
                ),
            }

            markup = self.proxy.post_process(markup).await?;
        }

        let markup = self.apply_transform(&settings, markup);

        log::info!(
            "{} SVG size: {}",
            LOG_TAG_ORCHESTRATOR,
            format_bytes(markup.len())
        );

        let artifact = Artifact::svg(markup, self.document.title.clone());
        self.dispatcher
            .dispatch(&artifact, settings.output_target)
            .await
    }

    /// At most one transform runs; minify wins when both are enabled.
    /// The untransformed markup is already valid, so a transform failure
    /// only costs the transform.
    fn apply_transform(&self, settings: &CaptureSettings, markup: String) -> String {
        let transform: Option<(&str, &dyn MarkupTransform)> = if settings.minify {
            Some(("minify", self.collaborators.minifier.as_ref()))
        } else if settings.pretty_print {
            Some(("pretty-print", self.collaborators.pretty_printer.as_ref()))
        } else {
            None
        };

        match transform {
            Some((name, transform)) => match transform.transform(&markup) {
                Ok(transformed) => transformed,
                Err(error) => {
                    log::warn!(
                        "{} {} failed, keeping untransformed markup: {}",
                        LOG_TAG_ORCHESTRATOR,
                        name,
                        error
                    );
                    markup
                }
            },
            None => markup,
        }
    }
}
