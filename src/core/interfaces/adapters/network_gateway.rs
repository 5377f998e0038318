use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Full-metadata network access available only to the privileged context.
/// The fetch proxy reads the complete response body before replying, so
/// the message channel never carries partial payloads.
#[async_trait]
pub trait NetworkGateway: Send + Sync {
    async fn perform(
        &self,
        url: &str,
        method: Option<&str>,
        headers: &BTreeMap<String, String>,
    ) -> Result<GatewayResponse>;
}
