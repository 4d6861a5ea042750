use serde::{Deserialize, Serialize};

/// A video attached to a devotion, either fetched live or from static fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDescriptor {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    /// Length in seconds
    pub duration: u32,
    pub description: String,
}
