use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use super::track::VideoId;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
const MAX_RETRIES: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
}

/// Resolves video titles through YouTube's oEmbed endpoint.
pub struct TitleFetcher {
    client: reqwest::Client,
}

impl TitleFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// `None` means every attempt failed; the caller substitutes a
    /// synthesized title so the playlist entry never stays on its
    /// placeholder.
    pub async fn fetch_title(&self, id: &VideoId) -> Option<String> {
        let watch_url = format!("https://www.youtube.com/watch?v={id}");
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                tokio::time::sleep(RETRY_DELAY).await;
            }
            match self.try_fetch(&watch_url).await {
                Ok(title) if !title.trim().is_empty() => return Some(title),
                Ok(_) => return None,
                Err(e) => {
                    tracing::debug!(id = %id, attempt, "title fetch failed: {e:#}");
                }
            }
        }
        None
    }

    async fn try_fetch(&self, watch_url: &str) -> Result<String> {
        let response = self
            .client
            .get(OEMBED_ENDPOINT)
            .query(&[("url", watch_url), ("format", "json")])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("oembed returned {}", response.status());
        }

        let body = response.json::<OembedResponse>().await?;
        Ok(body.title)
    }
}
