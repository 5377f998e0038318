//! Privileged-side network access for the fetch proxy. Reads the whole
//! response body so the reply crosses the channel in one frame.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::interfaces::adapters::{GatewayResponse, NetworkGateway};

pub struct HttpNetworkGateway {
    client: reqwest::Client,
}

impl HttpNetworkGateway {
    pub fn build() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NetworkGateway for HttpNetworkGateway {
    async fn perform(
        &self,
        url: &str,
        method: Option<&str>,
        headers: &BTreeMap<String, String>,
    ) -> Result<GatewayResponse> {
        let method = reqwest::Method::from_bytes(method.unwrap_or("GET").as_bytes())?;

        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;

        let status = response.status();
        let mut response_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.insert(name.to_string(), value.to_string());
            }
        }
        let content_type = response_headers
            .get("content-type")
            .cloned()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let body = response.bytes().await?.to_vec();

        Ok(GatewayResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response_headers,
            body,
            content_type,
        })
    }
}
