//! Devotion video lookup
//!
//! [`VideoSelector`] runs cache, then external search, then duration filter,
//! and degrades to a static per-theme fallback on any failure.

mod cache;
mod fallback;
mod selector;
mod youtube;

pub use cache::{TtlCache, VideoCache};
pub use fallback::{FallbackFile, FallbackVideos};
pub use selector::VideoSelector;
#[cfg(test)]
pub use selector::VideoSource;
pub use youtube::YouTubeClient;

use async_trait::async_trait;

use crate::error::ExternalServiceError;
use crate::models::VideoDescriptor;

/// Search restrictions passed through to the platform
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub safe_search: String,
    pub relevance_language: String,
    pub max_results: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            safe_search: "strict".to_string(),
            relevance_language: "en".to_string(),
            max_results: 10,
        }
    }
}

/// A search hit before its details are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub video_id: String,
    pub title: String,
}

/// External video search. Implemented by [`YouTubeClient`] and by test stubs.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchCandidate>, ExternalServiceError>;

    async fn get_details(&self, ids: &[String]) -> Result<Vec<VideoDescriptor>, ExternalServiceError>;
}
