//! YouTube Data API candidate source.
//!
//! A run issues two requests: a `search` for broadcasts of the requested event
//! type, then a `videos` lookup that adds category codes and stream timestamps
//! to the hits.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::{CandidateQuery, CandidateSource};
use crate::config::ApiCredentials;
use crate::error::{ErrorContext, GeneratorError, GeneratorResult};
use crate::models::Candidate;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    title: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Option<VideoSnippet>,
    #[serde(default)]
    live_streaming_details: Option<LiveStreamingDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    category_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveStreamingDetails {
    #[serde(default)]
    scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    actual_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    actual_end_time: Option<DateTime<Utc>>,
}

/// Candidate source backed by the YouTube Data API v3.
pub struct YouTubeSource {
    client: reqwest::Client,
    credentials: ApiCredentials,
    base_url: String,
}

impl YouTubeSource {
    /// Create a source with a 20 second request timeout.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                GeneratorError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the source at another API root (proxies, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_params(&self, query: &CandidateQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("eventType", query.mode.event_type().to_string()),
            ("q", query.query.clone()),
            ("maxResults", query.max_results.to_string()),
            ("key", self.credentials.api_key.clone()),
        ];
        if let Some(after) = query.published_after {
            params.push(("publishedAfter", rfc3339(after)));
        }
        if let Some(before) = query.published_before {
            params.push(("publishedBefore", rfc3339(before)));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> GeneratorResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let context = || {
            ErrorContext::new("fetch_candidates")
                .with_entity("youtube")
                .with_entity_id(endpoint)
        };

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| GeneratorError::from(e).with_operation("fetch_candidates"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<empty response>".to_string());

        if !status.is_success() {
            let mut ctx = context().with_details(format!("status={}", status));
            if status.is_server_error() || status.as_u16() == 429 {
                ctx = ctx.retryable();
            }
            return Err(GeneratorError::acquisition_with_context(
                format!("{} request failed: {}", endpoint, body.trim()),
                ctx,
            ));
        }

        decode(endpoint, &body)
    }
}

#[async_trait]
impl CandidateSource for YouTubeSource {
    async fn fetch_candidates(&self, query: &CandidateQuery) -> GeneratorResult<Vec<Candidate>> {
        log::info!(
            "Searching YouTube for '{}' ({} broadcasts, up to {})",
            query.query,
            query.mode.event_type(),
            query.max_results
        );

        let search: SearchResponse = self.get_json("search", &self.search_params(query)).await?;
        let candidates = candidates_from_search(search);
        if candidates.is_empty() {
            log::warn!("Search returned no videos");
            return Ok(candidates);
        }

        let ids = candidates
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let params = [
            ("part", "snippet,liveStreamingDetails".to_string()),
            ("id", ids),
            ("key", self.credentials.api_key.clone()),
        ];
        let videos: VideosResponse = self.get_json("videos", &params).await?;

        let enriched = enrich(candidates, videos);
        log::debug!("Enriched {} candidates with video details", enriched.len());
        Ok(enriched)
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> GeneratorResult<T> {
    serde_json::from_str(body).map_err(|e| {
        GeneratorError::acquisition_with_context(
            format!("Failed to parse {} response: {}", endpoint, e),
            ErrorContext::new("fetch_candidates")
                .with_entity("youtube")
                .with_entity_id(endpoint),
        )
    })
}

/// Hits without a video id (channels, playlists) are skipped.
fn candidates_from_search(search: SearchResponse) -> Vec<Candidate> {
    search
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            Some(Candidate::new(id, item.snippet.title, item.snippet.channel_title))
        })
        .collect()
}

fn enrich(candidates: Vec<Candidate>, videos: VideosResponse) -> Vec<Candidate> {
    let mut details: HashMap<String, VideoItem> = videos
        .items
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect();

    candidates
        .into_iter()
        .map(|mut candidate| {
            if let Some(video) = details.remove(&candidate.id) {
                candidate.category_id = video.snippet.and_then(|s| s.category_id);
                let live = video.live_streaming_details.unwrap_or_default();
                candidate = candidate.with_schedule(
                    live.scheduled_start_time,
                    live.actual_start_time,
                    live.actual_end_time,
                );
            }
            candidate
        })
        .collect()
}
