// ABOUTME: YoutubeSearch - resolves song names to YouTube video ids.
// ABOUTME: Fetches the public results page and takes the first video id on it.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Url;

use super::SearchCapability;
use crate::error::CapabilityError;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""videoId"\s*:\s*"([A-Za-z0-9_-]{11})""#).expect("valid video id pattern")
});

/// Search capability backed by the YouTube results page.
pub struct YoutubeSearch {
    client: reqwest::Client,
    base_url: String,
}

impl YoutubeSearch {
    /// Create a searcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; tunefetch/0.1)")
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the searcher at a different host (mirrors, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn results_url(&self, query: &str) -> String {
        format!(
            "{}/results?search_query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Extract the first video id from a results page.
    fn first_video_id(html: &str) -> Option<String> {
        VIDEO_ID
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[async_trait]
impl SearchCapability for YoutubeSearch {
    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError> {
        let response = self
            .client
            .get(self.results_url(query))
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;
        Ok(Self::first_video_id(&html))
    }
}

/// Canonical watch URL for a video id.
pub fn watch_url(id: &str) -> String {
    format!("{DEFAULT_BASE_URL}/watch?v={id}")
}

/// Extract the video id from a `youtu.be/<id>` or `…/watch?v=<id>` URL.
pub fn parse_video_id(url: &str) -> Option<String> {
    let url = Url::parse(url.trim()).ok()?;
    let host = url.host_str()?;

    let id = if host == "youtu.be" || host.ends_with(".youtu.be") {
        url.path_segments()?.next_back()?.to_string()
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else {
        return None;
    };

    if id.is_empty() { None } else { Some(id) }
}
