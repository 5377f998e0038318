//! Wire records for the cross-context message channel. Everything that
//! crosses the channel is serialized to JSON text; raw binary payloads
//! travel base64-encoded inside [`EncodedBinary`].

use std::collections::BTreeMap;

use anyhow::Result;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::models::{CaptureArea, SurfaceId};

/// Text-safe encoding of arbitrary binary bytes. Used only on the
/// transport hop; decoded back to bytes immediately on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedBinary(String);

impl EncodedBinary {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.0)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    #[serde(default)]
    pub options: FetchOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReply {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: EncodedBinary,
    pub content_type: String,
}

/// Request sent from the unprivileged to the privileged context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "payload", rename_all = "camelCase")]
pub enum ProxyRequest {
    Started,
    Finished,
    Fetch(FetchRequest),
    PostProcess { markup: String },
}

/// Reply to a [`ProxyRequest`]. Privileged-side failures travel as the
/// `Error` variant, never as an unhandled failure across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum ProxyReply {
    Ack { status: String },
    Fetch(FetchReply),
    PostProcess { markup: String },
    Error { error: String },
}

impl ProxyReply {
    pub fn ok() -> Self {
        ProxyReply::Ack {
            status: "ok".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ProxyReply::Error {
            error: message.into(),
        }
    }
}

/// Envelope pairing a request with its correlation id. Explicit ids let
/// independent in-flight calls multiplex over one channel unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFrame {
    pub id: u64,
    pub surface: SurfaceId,
    pub request: ProxyRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFrame {
    pub id: u64,
    pub reply: ProxyReply,
}

/// External trigger into the unprivileged context: start one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub area: CaptureArea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptureResponse {
    Ok { ok: bool },
    Failed { error: String },
}

impl CaptureResponse {
    pub fn ok() -> Self {
        CaptureResponse::Ok { ok: true }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        CaptureResponse::Failed {
            error: message.into(),
        }
    }
}
