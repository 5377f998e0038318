use serde::{Deserialize, Serialize};

/// Whether a capture covers the whole document or a rectangle the user
/// drags out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureArea {
    FullDocument,
    UserSelectedRegion,
}
