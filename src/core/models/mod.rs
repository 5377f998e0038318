mod artifact;
mod capture_area;
mod capture_settings;
mod page_document;
mod region;
mod surface;

pub use artifact::Artifact;
pub use capture_area::CaptureArea;
pub use capture_settings::{CaptureSettings, OutputTarget};
pub use page_document::{DocumentNode, PageDocument, Viewport};
pub use region::Region;
pub use surface::SurfaceId;
