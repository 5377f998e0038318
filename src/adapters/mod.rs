mod ephemeral_styled_host;
mod http_network_gateway;
mod http_resource_fetcher;
mod json_file_settings_store;
mod markup_transforms;
mod reference_inliner;
mod surface_opener;
mod svg_tree_serializer;
mod system_clipboard;

pub use ephemeral_styled_host::EphemeralStyledHost;
pub use http_network_gateway::HttpNetworkGateway;
pub use http_resource_fetcher::{
    FallbackResourceFetcher, HttpResourceFetcher, ProxiedResourceFetcher,
};
pub use json_file_settings_store::JsonFileSettingsStore;
pub use markup_transforms::{MarkupMinifier, MarkupPrettyPrinter};
pub use reference_inliner::ReferenceInliner;
pub use surface_opener::DetachedSurfaceOpener;
pub use svg_tree_serializer::SvgTreeSerializer;
pub use system_clipboard::SystemClipboard;
