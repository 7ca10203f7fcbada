//! Transcript model, search engine and text rendering.

mod format;
mod models;
mod search;

pub use format::{
    format_match_report, format_section, format_segments, format_timestamp, timestamp_link,
    LinkTarget,
};
pub use models::{Segment, Transcript};
pub use search::{
    build_match_records, find_matches, search, slice_transcript, ContextWindow, MatchRecord,
};
