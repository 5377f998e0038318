mod capture_orchestrator;

pub use capture_orchestrator::{CaptureOrchestrator, PagePorts, PipelineCollaborators};
