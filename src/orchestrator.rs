//! Tool orchestrator for Tubetext.
//!
//! Resolves the caller's video reference, fetches the transcript and title,
//! runs the search engine and renders the result as text. Failures never
//! escape: each is turned into a descriptive message for the caller.

use crate::config::Settings;
use crate::error::Result;
use crate::source::{self, MetadataSource, OembedClient, TranscriptSource, VideoDetails, YoutubeSource};
use crate::transcript::{
    format_match_report, format_section, format_segments, format_timestamp, search,
    slice_transcript, LinkTarget, Transcript,
};
use futures::future::join;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The main orchestrator behind every tool.
pub struct Orchestrator {
    settings: Settings,
    transcripts: Arc<dyn TranscriptSource>,
    metadata: Arc<dyn MetadataSource>,
}

impl Orchestrator {
    /// Create a new orchestrator backed by yt-dlp and oEmbed.
    pub fn new(settings: Settings) -> Result<Self> {
        let transcripts = Arc::new(YoutubeSource::new(&settings)?);
        let metadata = Arc::new(OembedClient::new(&settings)?);
        Ok(Self::with_sources(settings, transcripts, metadata))
    }

    /// Create an orchestrator with custom sources.
    pub fn with_sources(
        settings: Settings,
        transcripts: Arc<dyn TranscriptSource>,
        metadata: Arc<dyn MetadataSource>,
    ) -> Self {
        Self {
            settings,
            transcripts,
            metadata,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn link_target<'a>(&'a self, video_id: &'a str) -> LinkTarget<'a> {
        LinkTarget {
            host: &self.settings.youtube.host,
            video_id,
        }
    }

    /// Fetch a transcript, treating every failure as "unavailable".
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, video_id: &str) -> Transcript {
        match self
            .transcripts
            .fetch_segments(video_id, &self.settings.youtube.languages)
            .await
        {
            Ok(segments) => {
                info!("Fetched {} transcript segments", segments.len());
                Transcript::from_segments(segments)
            }
            Err(e) => {
                warn!("Transcript unavailable for {}: {}", video_id, e);
                Transcript::Unavailable
            }
        }
    }

    /// Fetch the video title, falling back to a placeholder.
    pub async fn title_or_placeholder(&self, video_id: &str) -> String {
        match self.metadata.title(video_id).await {
            Ok(title) => title,
            Err(e) => {
                warn!("Title lookup failed for {}: {}", video_id, e);
                placeholder_title(video_id)
            }
        }
    }

    async fn title_and_transcript(&self, video_id: &str) -> (String, Transcript) {
        join(
            self.title_or_placeholder(video_id),
            self.fetch_transcript(video_id),
        )
        .await
    }

    /// Full timestamped transcript.
    pub async fn get_full_transcript(&self, video_url: &str) -> String {
        let video_id = match source::resolve(video_url) {
            Ok(id) => id,
            Err(e) => return format!("Error retrieving transcript: {}", e),
        };

        let (title, transcript) = self.title_and_transcript(&video_id).await;
        match &transcript {
            Transcript::Unavailable => format!("No transcript available for video: {}", title),
            Transcript::Available(segments) if segments.is_empty() => {
                format!("The transcript for video {} is empty.", title)
            }
            Transcript::Available(segments) => format_segments(segments),
        }
    }

    /// Title, ID and caption languages of a video.
    pub async fn get_video_information(&self, video_url: &str) -> String {
        let video_id = match source::resolve(video_url) {
            Ok(id) => id,
            Err(e) => return format!("Error retrieving video information: {}", e),
        };

        let (title, details) = join(
            self.metadata.title(&video_id),
            self.transcripts.describe(&video_id),
        )
        .await;

        let details = details.unwrap_or_else(|e| {
            warn!("Could not describe {}: {}", video_id, e);
            VideoDetails::default()
        });
        let title = title
            .ok()
            .or_else(|| details.title.clone())
            .unwrap_or_else(|| placeholder_title(&video_id));

        render_video_information(&video_id, &title, &details)
    }

    /// Matches for `query` with surrounding context.
    pub async fn search_transcript(
        &self,
        video_url: &str,
        query: &str,
        context_window: Option<u32>,
    ) -> String {
        if query.trim().is_empty() {
            return "Error: the search query must not be empty.".to_string();
        }

        let video_id = match source::resolve(video_url) {
            Ok(id) => id,
            Err(e) => return format!("Error processing transcript: {}", e),
        };

        let (title, transcript) = self.title_and_transcript(&video_id).await;
        if !transcript.is_available() {
            return format!("No transcript available for video: {}", title);
        }

        let window = context_window.unwrap_or(self.settings.search.context_window_seconds);
        let records = search(&transcript, query, f64::from(window));
        info!("Found {} matches for '{}'", records.len(), query);

        format_match_report(&records, query, &title, self.link_target(&video_id))
    }

    /// Segments between `start_time` and `end_time` (zero for end of video).
    pub async fn get_transcript_section(
        &self,
        video_url: &str,
        start_time: f64,
        end_time: f64,
    ) -> String {
        let video_id = match source::resolve(video_url) {
            Ok(id) => id,
            Err(e) => return format!("Error retrieving transcript section: {}", e),
        };

        let transcript = self.fetch_transcript(&video_id).await;
        if !transcript.is_available() {
            let title = self.title_or_placeholder(&video_id).await;
            return format!(
                "No transcript available for video: {} (ID: {})",
                title, video_id
            );
        }

        let section = slice_transcript(&transcript, start_time, end_time);
        format_section(&section, start_time, end_time, self.link_target(&video_id))
    }
}

fn placeholder_title(video_id: &str) -> String {
    format!("Video {}", video_id)
}

fn render_video_information(video_id: &str, title: &str, details: &VideoDetails) -> String {
    let mut output = format!("Title: {}\nVideo ID: {}\n", title, video_id);

    if let Some(channel) = &details.channel {
        output.push_str(&format!("Channel: {}\n", channel));
    }
    if let Some(duration) = details.duration_seconds {
        output.push_str(&format!("Duration: {}\n", format_timestamp(f64::from(duration))));
    }
    if let Some(published) = details.published_at {
        output.push_str(&format!("Published: {}\n", published.format("%Y-%m-%d")));
    }

    if details.tracks.is_empty() {
        output.push_str("No transcripts available for this video.");
    } else {
        let languages: Vec<String> = details.tracks.iter().map(|t| t.label()).collect();
        output.push_str(&format!(
            "Available transcript languages: {}",
            languages.join(", ")
        ));
    }

    output
}
