//! Text rendering of transcripts and search results.
//!
//! Everything here produces plain text meant to be read by an AI agent,
//! which reformats it for the end user.

use super::models::Segment;
use super::search::{ContextWindow, MatchRecord};

const RESULT_DIVIDER_WIDTH: usize = 50;

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Watch URL that starts playback at `seconds`.
pub fn timestamp_link(host: &str, video_id: &str, seconds: f64) -> String {
    format!(
        "https://{}/watch?v={}&t={}s",
        host,
        video_id,
        seconds.max(0.0) as u64
    )
}

/// Render segments as `[TS] text` paragraphs separated by blank lines.
pub fn format_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> String {
    let mut output = String::new();
    for segment in segments {
        output.push_str(&format!(
            "[{}] {}\n\n",
            format_timestamp(segment.start),
            segment.text
        ));
    }
    output
}

/// Where a search report's links should point.
#[derive(Debug, Clone, Copy)]
pub struct LinkTarget<'a> {
    pub host: &'a str,
    pub video_id: &'a str,
}

impl LinkTarget<'_> {
    fn at(&self, seconds: f64) -> String {
        timestamp_link(self.host, self.video_id, seconds)
    }
}

/// Render search results with context for each match.
pub fn format_match_report(
    records: &[MatchRecord<'_>],
    query: &str,
    title: &str,
    link: LinkTarget<'_>,
) -> String {
    if records.is_empty() {
        return format!("No matches found for '{}' in video: {}", query, title);
    }

    let mut output = format!(
        "Found {} matches for '{}' in video: {}\n\n",
        records.len(),
        query,
        title
    );

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
            output.push_str(&"-".repeat(RESULT_DIVIDER_WIDTH));
            output.push_str("\n\n");
        }

        push_context(
            &mut output,
            "CONTEXT BEFORE",
            &record.context_before,
            "No context available before this match (beginning of video)",
        );

        output.push_str("\n=== QUERY MATCH ===\n");
        let segment_link = link.at(record.match_time());
        match record.next_segment {
            Some(next) => {
                output.push_str(&line(record.segment));
                output.push_str(&line(next));
                output.push_str(&format!("(Link: {})\n", segment_link));
            }
            None => {
                output.push_str(&format!(
                    "[{}] {} (Link: {})\n",
                    format_timestamp(record.segment.start),
                    record.segment.text,
                    segment_link
                ));
            }
        }

        output.push('\n');
        push_context(
            &mut output,
            "CONTEXT AFTER",
            &record.context_after,
            "No context available after this match (end of video)",
        );
    }

    output
}

fn push_context(output: &mut String, heading: &str, window: &ContextWindow<'_>, empty: &str) {
    output.push_str(&format!(
        "=== {} (AVAILABLE: {}s) ===\n",
        heading, window.available_seconds as u64
    ));
    if window.entries.is_empty() {
        output.push_str(empty);
        output.push('\n');
    } else {
        for entry in &window.entries {
            output.push_str(&line(entry));
        }
    }
}

fn line(segment: &Segment) -> String {
    format!("[{}] {}\n", format_timestamp(segment.start), segment.text)
}

/// Render a time-bounded slice of a transcript. `end_time` of zero means
/// through the end of the video.
pub fn format_section(
    segments: &[&Segment],
    start_time: f64,
    end_time: f64,
    link: LinkTarget<'_>,
) -> String {
    let end_label = if end_time == 0.0 {
        "end of video".to_string()
    } else {
        format_timestamp(end_time)
    };

    let body = if segments.is_empty() {
        "No transcript entries in this time range.\n".to_string()
    } else {
        format_segments(segments.iter().copied())
    };

    format!(
        "Transcript section from {} to {}:\n\nTimestamped link: {}\n\n{}",
        format_timestamp(start_time),
        end_label,
        link.at(start_time),
        body
    )
}
