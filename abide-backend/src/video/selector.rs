//! Cache, then live search, then static fallback

use std::sync::Arc;
use std::time::Duration;

use super::{FallbackVideos, SearchFilters, TtlCache, VideoCache, VideoSearch};
use crate::config::VideoConfig;
use crate::error::ExternalServiceError;
use crate::models::VideoDescriptor;

/// Preferred video length in seconds
const TARGET_DURATION: u32 = 300;
/// How many search hits get a details lookup
const DETAIL_CANDIDATES: usize = 5;

/// Which stage of the pipeline produced a video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSource {
    Cache,
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct VideoSelection {
    pub video: VideoDescriptor,
    pub source: VideoSource,
}

pub struct VideoSelector {
    /// `None` when no API credential is configured
    search: Option<Arc<dyn VideoSearch>>,
    cache: Arc<dyn VideoCache>,
    fallbacks: FallbackVideos,
    filters: SearchFilters,
    cache_ttl: Duration,
    timeout: Duration,
}

impl VideoSelector {
    pub fn new(
        search: Option<Arc<dyn VideoSearch>>,
        fallbacks: FallbackVideos,
        config: &VideoConfig,
    ) -> Self {
        Self {
            search,
            cache: Arc::new(TtlCache::<VideoDescriptor>::new()),
            fallbacks,
            filters: SearchFilters {
                safe_search: config.safe_search.clone(),
                ..SearchFilters::default()
            },
            cache_ttl: config.cache_ttl,
            timeout: config.request_timeout,
        }
    }

    /// One video for `theme` with a duration in `min_duration..=max_duration`.
    /// Never fails: every external problem degrades to the theme's fallback.
    pub async fn select(&self, theme: &str, max_duration: u32, min_duration: u32) -> VideoSelection {
        let Some(search) = &self.search else {
            return self.fallback(theme);
        };

        let key = cache_key(theme, max_duration);
        if let Some(video) = self.cache.get(&key) {
            log::debug!("[VIDEO] Cache hit for '{}'", key);
            return VideoSelection {
                video,
                source: VideoSource::Cache,
            };
        }

        let lookup = self.lookup(search.as_ref(), theme, max_duration, min_duration);
        let result = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(ExternalServiceError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(Some(video)) => {
                self.cache.set(&key, video.clone(), self.cache_ttl);
                VideoSelection {
                    video,
                    source: VideoSource::Live,
                }
            }
            Ok(None) => {
                log::warn!(
                    "[VIDEO] No videos for '{}' between {}s and {}s, using fallback",
                    theme,
                    min_duration,
                    max_duration
                );
                self.fallback(theme)
            }
            Err(e) => {
                log::warn!("[VIDEO] Search for '{}' failed, using fallback: {}", theme, e);
                self.fallback(theme)
            }
        }
    }

    async fn lookup(
        &self,
        search: &dyn VideoSearch,
        theme: &str,
        max_duration: u32,
        min_duration: u32,
    ) -> Result<Option<VideoDescriptor>, ExternalServiceError> {
        let query = format!("Christian {} worship devotional", theme);
        let candidates = search.search(&query, &self.filters).await?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let ids: Vec<String> = candidates
            .into_iter()
            .take(DETAIL_CANDIDATES)
            .map(|c| c.video_id)
            .collect();
        let details = search.get_details(&ids).await?;

        Ok(closest_to_target(details, min_duration, max_duration))
    }

    fn fallback(&self, theme: &str) -> VideoSelection {
        VideoSelection {
            video: self.fallbacks.for_theme(theme).clone(),
            source: VideoSource::Fallback,
        }
    }
}

fn cache_key(theme: &str, max_duration: u32) -> String {
    format!("youtube_search:{}:{}", theme, max_duration)
}

/// In-range video closest to [`TARGET_DURATION`]; earliest wins a tie
fn closest_to_target(videos: Vec<VideoDescriptor>, min: u32, max: u32) -> Option<VideoDescriptor> {
    videos
        .into_iter()
        .filter(|v| (min..=max).contains(&v.duration))
        .min_by_key(|v| v.duration.abs_diff(TARGET_DURATION))
}
