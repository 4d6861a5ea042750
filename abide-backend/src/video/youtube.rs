//! YouTube Data API v3 client

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{SearchCandidate, SearchFilters, VideoSearch};
use crate::error::ExternalServiceError;
use crate::models::VideoDescriptor;

const DESCRIPTION_LIMIT: usize = 200;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("duration pattern is valid")
});

/// Seconds in an ISO 8601 duration such as `PT4M13S`. Unparseable or
/// out-of-range input is 0.
pub fn parse_duration(raw: &str) -> u32 {
    let Some(caps) = ISO_DURATION.captures(raw.trim()) else {
        return 0;
    };
    let part = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u64>().ok());
    let seconds = match (part(1), part(2), part(3)) {
        (Some(h), Some(m), Some(s)) => h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(s),
        _ => return 0,
    };
    u32::try_from(seconds).unwrap_or(0)
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: Snippet,
    #[serde(default)]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

impl From<VideoItem> for VideoDescriptor {
    fn from(item: VideoItem) -> Self {
        let thumbnail_url = item
            .snippet
            .thumbnails
            .medium
            .or(item.snippet.thumbnails.default)
            .map(|t| t.url)
            .unwrap_or_default();
        VideoDescriptor {
            video_id: item.id,
            title: item.snippet.title,
            channel_title: item.snippet.channel_title,
            thumbnail_url,
            duration: parse_duration(&item.content_details.duration),
            description: truncate_description(&item.snippet.description),
        }
    }
}

pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ExternalServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ExternalServiceError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExternalServiceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ExternalServiceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchCandidate>, ExternalServiceError> {
        let max_results = filters.max_results.to_string();
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "video"),
                    ("videoDuration", "medium"),
                    ("safeSearch", filters.safe_search.as_str()),
                    ("relevanceLanguage", filters.relevance_language.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                item.id.video_id.map(|video_id| SearchCandidate {
                    video_id,
                    title: item.snippet.title,
                })
            })
            .collect())
    }

    async fn get_details(&self, ids: &[String]) -> Result<Vec<VideoDescriptor>, ExternalServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.join(",");
        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", "snippet,contentDetails"), ("id", joined.as_str())],
            )
            .await?;
        Ok(response.items.into_iter().map(VideoDescriptor::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(url: &str) -> YouTubeClient {
        YouTubeClient::new(url, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("PT4M13S"), 253);
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT10M"), 600);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("P1D"), 0);
        assert_eq!(parse_duration("garbage"), 0);
    }

    #[test]
    fn test_parse_duration_out_of_range_is_zero() {
        assert_eq!(parse_duration("PT1193047H"), 0);
        assert_eq!(parse_duration("PT99999999999S"), 0);
        assert_eq!(parse_duration("PT1193046H"), 1193046 * 3600);
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short"), "short");
        let long = "a".repeat(250);
        let cut = truncate_description(&long);
        assert_eq!(cut.len(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_description(&"b".repeat(200)).len(), 200);
    }

    #[tokio::test]
    async fn test_search_sends_filters_and_parses_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Christian hope worship devotional".into()),
                Matcher::UrlEncoded("videoDuration".into(), "medium".into()),
                Matcher::UrlEncoded("safeSearch".into(), "strict".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"items": [
                    {"id": {"videoId": "abc"}, "snippet": {"title": "First"}},
                    {"id": {"channelId": "xyz"}, "snippet": {"title": "A channel"}}
                ]}"#,
            )
            .create_async()
            .await;

        let results = client(&server.url())
            .search("Christian hope worship devotional", &SearchFilters::default())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(
            results,
            vec![SearchCandidate {
                video_id: "abc".to_string(),
                title: "First".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_get_details_maps_metadata() {
        let mut server = mockito::Server::new_async().await;
        let description = "d".repeat(300);
        let body = serde_json::json!({
            "items": [{
                "id": "abc",
                "snippet": {
                    "title": "Worship",
                    "channelTitle": "Church",
                    "description": description,
                    "thumbnails": {"default": {"url": "http://img/default.jpg"}}
                },
                "contentDetails": {"duration": "PT5M"}
            }]
        });
        server
            .mock("GET", "/videos")
            .match_query(Matcher::UrlEncoded("id".into(), "abc,def".into()))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let videos = client(&server.url())
            .get_details(&["abc".to_string(), "def".to_string()])
            .await
            .unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].duration, 300);
        assert_eq!(videos[0].thumbnail_url, "http://img/default.jpg");
        assert_eq!(videos[0].description.chars().count(), 203);
    }

    #[tokio::test]
    async fn test_item_without_content_details_parses_as_zero() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "items": [
                {"id": "nodetails", "snippet": {"title": "Live stream"}},
                {
                    "id": "ok",
                    "snippet": {"title": "Worship"},
                    "contentDetails": {"duration": "PT4M"}
                }
            ]
        });
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let videos = client(&server.url())
            .get_details(&["nodetails".to_string(), "ok".to_string()])
            .await
            .unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].duration, 0);
        assert_eq!(videos[1].duration, 240);
    }

    #[tokio::test]
    async fn test_rate_limit_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = client(&server.url())
            .search("q", &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExternalServiceError::Status(429)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server.url())
            .search("q", &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExternalServiceError::Malformed(_)));
    }
}
