//! Title lookup through the public oEmbed endpoint.

use super::MetadataSource;
use crate::config::Settings;
use crate::error::{Result, TubetextError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use url::Url;

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
}

/// oEmbed metadata client.
pub struct OembedClient {
    host: String,
    client: reqwest::Client,
}

impl OembedClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.youtube.request_timeout_seconds))
            .build()?;

        Ok(Self {
            host: settings.youtube.host.clone(),
            client,
        })
    }
}

#[async_trait]
impl MetadataSource for OembedClient {
    #[instrument(skip(self))]
    async fn title(&self, video_id: &str) -> Result<String> {
        let watch_url = format!("https://{}/watch?v={}", self.host, video_id);
        let endpoint = Url::parse_with_params(
            &format!("https://{}/oembed", self.host),
            &[("format", "json"), ("url", watch_url.as_str())],
        )
        .map_err(|e| TubetextError::Config(format!("Invalid host '{}': {}", self.host, e)))?;

        let response = self.client.get(endpoint).send().await?;

        if !response.status().is_success() {
            return Err(TubetextError::VideoSource(format!(
                "oEmbed lookup for {} returned {}",
                video_id,
                response.status()
            )));
        }

        let body: OembedResponse = response.json().await?;
        Ok(body.title)
    }
}
