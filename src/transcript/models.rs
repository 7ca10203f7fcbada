//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// A single timestamped unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// Caption text.
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// A fetched transcript, or the fact that none could be fetched.
///
/// `Available(vec![])` is a video with an empty caption track, which is
/// distinct from a video with no captions at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "segments", rename_all = "lowercase")]
pub enum Transcript {
    Available(Vec<Segment>),
    Unavailable,
}

impl Transcript {
    /// Build an available transcript, ordering segments by start time.
    pub fn from_segments(mut segments: Vec<Segment>) -> Self {
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        Transcript::Available(segments)
    }

    /// Segments of the transcript; empty when unavailable.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Transcript::Available(segments) => segments,
            Transcript::Unavailable => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Transcript::Available(_))
    }

    /// Start time of the final segment, or zero for an empty transcript.
    pub fn last_start(&self) -> f64 {
        self.segments().last().map(|s| s.start).unwrap_or(0.0)
    }
}
