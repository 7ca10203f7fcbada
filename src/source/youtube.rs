//! YouTube caption source backed by yt-dlp.

use super::captions::{parse_json3, select_track, tracks_from_ytdlp};
use super::{TranscriptSource, VideoDetails};
use crate::config::Settings;
use crate::error::{Result, TubetextError};
use crate::transcript::Segment;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// YouTube caption source.
pub struct YoutubeSource {
    ytdlp: PathBuf,
    host: String,
    client: reqwest::Client,
}

impl YoutubeSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.youtube.request_timeout_seconds))
            .build()?;

        Ok(Self {
            ytdlp: settings.ytdlp_path(),
            host: settings.youtube.host.clone(),
            client,
        })
    }

    fn watch_url(&self, video_id: &str) -> String {
        format!("https://{}/watch?v={}", self.host, video_id)
    }

    /// Run yt-dlp and return its JSON description of the video.
    async fn dump_json(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = self.watch_url(video_id);

        let output = tokio::process::Command::new(&self.ytdlp)
            .args(["--dump-json", "--skip-download", "--no-warnings", "--no-playlist"])
            .arg(&url)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TubetextError::ToolNotFound(self.ytdlp.display().to_string())
                } else {
                    TubetextError::ToolFailed(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TubetextError::VideoSource(format!(
                "Video {} not found or unavailable: {}",
                video_id,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            TubetextError::VideoSource(format!("Failed to parse yt-dlp output: {}", e))
        })
    }
}

/// Build video details from `yt-dlp --dump-json` output.
pub(crate) fn details_from_ytdlp(json: &serde_json::Value) -> VideoDetails {
    let channel = json["channel"]
        .as_str()
        .or_else(|| json["uploader"].as_str())
        .map(|s| s.to_string());

    // yt-dlp returns the upload date as YYYYMMDD
    let published_at = json["upload_date"].as_str().and_then(|date_str| {
        chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    });

    VideoDetails {
        title: json["title"].as_str().map(|s| s.to_string()),
        channel,
        duration_seconds: json["duration"].as_f64().map(|d| d as u32),
        published_at,
        tracks: tracks_from_ytdlp(json),
    }
}

#[async_trait]
impl TranscriptSource for YoutubeSource {
    #[instrument(skip(self))]
    async fn describe(&self, video_id: &str) -> Result<VideoDetails> {
        let json = self.dump_json(video_id).await?;
        let details = details_from_ytdlp(&json);
        debug!("Found {} caption tracks", details.tracks.len());
        Ok(details)
    }

    #[instrument(skip(self))]
    async fn fetch_segments(&self, video_id: &str, languages: &[String]) -> Result<Vec<Segment>> {
        let details = self.describe(video_id).await?;

        let track = select_track(&details.tracks, languages).ok_or_else(|| {
            TubetextError::TranscriptUnavailable(format!(
                "No captions in {} for video {}",
                languages.join(", "),
                video_id
            ))
        })?;

        info!(
            "Downloading {} captions ({})",
            if track.is_generated { "generated" } else { "manual" },
            track.language_code
        );

        let payload = self
            .client
            .get(&track.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&payload)
    }
}
