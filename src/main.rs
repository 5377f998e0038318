mod adapters;
mod app;
mod background;
mod core;
mod global_constants;
mod messaging;
mod ports;
mod utils;

use std::sync::Arc;

use crate::adapters::JsonFileSettingsStore;
use crate::core::interfaces::adapters::SettingsStore;
use crate::core::interfaces::ports::SelectionEvent;
use crate::core::models::{CaptureArea, DocumentNode, PageDocument, Region, Viewport};
use crate::messaging::CaptureRequest;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("{}", global_constants::STARTUP_BANNER);
    log::info!("{} starting svg-screenshot", global_constants::LOG_TAG_APP);

    let settings_store: Arc<dyn SettingsStore> = match JsonFileSettingsStore::at_default_location()
    {
        Ok(store) => Arc::new(store),
        Err(error) => {
            log::warn!(
                "{} no config directory ({}), using defaults",
                global_constants::LOG_TAG_APP,
                error
            );
            Arc::new(JsonFileSettingsStore::at_path(
                std::env::temp_dir().join(global_constants::SETTINGS_FILE_NAME),
            ))
        }
    };

    let download_dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);

    let capture_app = app::CaptureApp::build(
        sample_document(),
        "https://example.com",
        settings_store,
        download_dir,
    )?;

    log::info!("{} capturing the full document", global_constants::LOG_TAG_APP);
    let response = capture_app
        .handle_capture_request(CaptureRequest {
            area: CaptureArea::FullDocument,
        })
        .await;
    log::info!(
        "{} full-document capture response: {:?} (trigger enabled: {})",
        global_constants::LOG_TAG_APP,
        response,
        capture_app.trigger_enabled()
    );

    log::info!(
        "{} capturing a user-selected region",
        global_constants::LOG_TAG_APP
    );
    let selection_input = capture_app.selection_input();
    for event in [
        SelectionEvent::PointerDown { x: 40.0, y: 40.0 },
        SelectionEvent::PointerMove { x: 320.0, y: 180.0 },
        SelectionEvent::PointerMove { x: 560.0, y: 300.0 },
        SelectionEvent::PointerUp,
    ] {
        selection_input
            .send(event)
            .await
            .map_err(|_| anyhow::anyhow!("selection input channel closed"))?;
    }
    let response = capture_app
        .handle_capture_request(CaptureRequest {
            area: CaptureArea::UserSelectedRegion,
        })
        .await;
    log::info!(
        "{} region capture response: {:?} (trigger enabled: {})",
        global_constants::LOG_TAG_APP,
        response,
        capture_app.trigger_enabled()
    );

    Ok(())
}

/// A small rendered document standing in for a live page.
fn sample_document() -> PageDocument {
    PageDocument::new(
        "SVG Screenshot Demo",
        Viewport {
            width: 800.0,
            height: 600.0,
        },
    )
    .with_nodes(vec![
        DocumentNode::Box {
            bounds: Region::new(0.0, 0.0, 800.0, 64.0),
            fill: "#1a1a2e".to_string(),
        },
        DocumentNode::Text {
            bounds: Region::new(24.0, 18.0, 400.0, 28.0),
            content: "SVG Screenshot".to_string(),
            font_size: 28.0,
            color: "#ffffff".to_string(),
        },
        DocumentNode::Text {
            bounds: Region::new(24.0, 96.0, 600.0, 16.0),
            content: "Captures the page as a portable vector image.".to_string(),
            font_size: 16.0,
            color: "#333333".to_string(),
        },
        DocumentNode::Link {
            href: "https://example.com/docs".to_string(),
            children: vec![DocumentNode::Text {
                bounds: Region::new(24.0, 128.0, 120.0, 16.0),
                content: "Documentation".to_string(),
                font_size: 16.0,
                color: "#4f46e5".to_string(),
            }],
        },
        DocumentNode::Image {
            bounds: Region::new(24.0, 176.0, 64.0, 64.0),
            // A 1x1 transparent pixel; already embedded, nothing to inline.
            href: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg=="
                .to_string(),
        },
    ])
}
