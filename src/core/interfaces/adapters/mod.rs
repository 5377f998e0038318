mod document_serializer;
mod markup_transform;
mod network_gateway;
mod resource_fetcher;
mod resource_inliner;
mod settings_store;

pub use document_serializer::{DocumentSerializer, SerializeOptions};
pub use markup_transform::MarkupTransform;
pub use network_gateway::{GatewayResponse, NetworkGateway};
pub use resource_fetcher::{FetchedResource, ResourceFetcher};
pub use resource_inliner::{InlineOutcome, ResourceInliner};
pub use settings_store::SettingsStore;
