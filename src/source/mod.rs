//! Transcript and metadata sources.
//!
//! Provides trait-based interfaces for fetching captions and video metadata,
//! with YouTube implementations backed by yt-dlp and oEmbed.

mod captions;
mod oembed;
pub mod video_id;
mod youtube;

pub use captions::{parse_json3, select_track, tracks_from_ytdlp};
pub use oembed::OembedClient;
pub use video_id::resolve;
pub use youtube::YoutubeSource;

use crate::error::Result;
use crate::transcript::Segment;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A caption track offered for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code, e.g. `en` or `pt-BR`.
    pub language_code: String,
    /// Human-readable language name.
    pub name: String,
    /// Whether the track was produced by automatic speech recognition.
    pub is_generated: bool,
    /// Download URL of the json3 rendition.
    pub url: String,
}

impl CaptionTrack {
    /// Label shown to callers listing available languages.
    pub fn label(&self) -> String {
        if self.is_generated {
            format!("{} ({}, auto-generated)", self.name, self.language_code)
        } else {
            format!("{} ({})", self.name, self.language_code)
        }
    }
}

/// Metadata about a video and its caption tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: Option<String>,
    pub channel: Option<String>,
    pub duration_seconds: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
    pub tracks: Vec<CaptionTrack>,
}

/// Trait for caption providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch metadata and the list of caption tracks for a video.
    async fn describe(&self, video_id: &str) -> Result<VideoDetails>;

    /// Fetch the segments of the best track for the preferred languages.
    async fn fetch_segments(&self, video_id: &str, languages: &[String]) -> Result<Vec<Segment>>;
}

/// Trait for video metadata lookups.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the title of a video.
    async fn title(&self, video_id: &str) -> Result<String>;
}
