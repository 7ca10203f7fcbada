//! Substring search over timestamped transcript segments.
//!
//! Matching is case-insensitive and exact. A phrase that the captioning
//! system split across two adjacent segments is recovered by a fallback pass
//! over consecutive segment pairs, which only runs when no single segment
//! contains the query. Phrases spanning three or more segments are not found.

use super::models::{Segment, Transcript};
use std::collections::HashSet;

/// Segments surrounding a match, plus how much of the requested window
/// actually exists inside the video.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextWindow<'a> {
    pub entries: Vec<&'a Segment>,
    /// Seconds of the window that lie within the video, clipped at its
    /// start or at the last segment's start time.
    pub available_seconds: f64,
}

/// One search hit with its surrounding context.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord<'a> {
    /// Index of the (first) matching segment.
    pub index: usize,
    pub segment: &'a Segment,
    /// Index of the following segment when the match spans two segments.
    pub next_index: Option<usize>,
    pub next_segment: Option<&'a Segment>,
    pub context_before: ContextWindow<'a>,
    pub context_after: ContextWindow<'a>,
}

impl MatchRecord<'_> {
    pub fn is_cross_segment(&self) -> bool {
        self.next_segment.is_some()
    }

    /// Time the match starts at.
    pub fn match_time(&self) -> f64 {
        self.segment.start
    }
}

/// Find segments whose text contains `query`, ignoring case.
///
/// Returns `(index, segment)` pairs in transcript order. When no single
/// segment matches, every adjacent pair whose joined texts contain the query
/// contributes both of its segments. Texts are joined with a space, and also
/// directly for words the captioner cut in two. The direct join is broader
/// than a space join alone: `"ab"` matches the pair `"xa"`, `"by"` even though
/// no word in either segment reads `ab`. An empty query matches nothing.
pub fn find_matches<'a>(transcript: &'a Transcript, query: &str) -> Vec<(usize, &'a Segment)> {
    let segments = transcript.segments();
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let matches: Vec<_> = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.text.to_lowercase().contains(&query))
        .collect();

    if !matches.is_empty() {
        return matches;
    }

    let mut matches = Vec::new();
    for (i, pair) in segments.windows(2).enumerate() {
        let left = pair[0].text.to_lowercase();
        let right = pair[1].text.to_lowercase();
        // Captions break both between words and, less often, inside a word.
        if format!("{left} {right}").contains(&query) || format!("{left}{right}").contains(&query) {
            matches.push((i, &pair[0]));
            matches.push((i + 1, &pair[1]));
        }
    }
    matches
}

/// Turn raw matches into records with `window` seconds of context.
///
/// A match immediately followed by another matched index is paired with it
/// into one cross-segment record; the paired index is consumed and never
/// produces a record of its own.
pub fn build_match_records<'a>(
    transcript: &'a Transcript,
    matches: &[(usize, &'a Segment)],
    window: f64,
) -> Vec<MatchRecord<'a>> {
    let segments = transcript.segments();
    let window = window.max(0.0);
    let last_start = transcript.last_start();

    let mut consumed: HashSet<usize> = HashSet::new();
    let mut records = Vec::new();

    for &(index, segment) in matches {
        if !consumed.insert(index) {
            continue;
        }

        let next = matches
            .iter()
            .find(|(other, _)| *other == index + 1)
            .copied();
        if let Some((next_index, _)) = next {
            consumed.insert(next_index);
        }

        let match_time = segment.start;

        let lower = (match_time - window).max(0.0);
        let context_before = ContextWindow {
            entries: segments
                .iter()
                .filter(|s| s.start >= lower && s.start < match_time)
                .collect(),
            available_seconds: match_time - lower,
        };

        let mut upper = match_time + window;
        if let Some((_, next_segment)) = next {
            upper = upper.max(next_segment.start + window);
        }
        let next_index = next.map(|(i, _)| i);
        let context_after = ContextWindow {
            entries: segments
                .iter()
                .enumerate()
                .filter(|(i, s)| {
                    s.start > match_time && s.start <= upper && Some(*i) != next_index
                })
                .map(|(_, s)| s)
                .collect(),
            available_seconds: (upper.min(last_start) - match_time).max(0.0),
        };

        records.push(MatchRecord {
            index,
            segment,
            next_index,
            next_segment: next.map(|(_, s)| s),
            context_before,
            context_after,
        });
    }

    records
}

/// Search `transcript` for `query` and collect `window` seconds of context.
pub fn search<'a>(transcript: &'a Transcript, query: &str, window: f64) -> Vec<MatchRecord<'a>> {
    let matches = find_matches(transcript, query);
    build_match_records(transcript, &matches, window)
}

/// Segments starting at or after `start_time` and, unless `end_time` is
/// zero (through the end of the video), at or before `end_time`.
pub fn slice_transcript(transcript: &Transcript, start_time: f64, end_time: f64) -> Vec<&Segment> {
    transcript
        .segments()
        .iter()
        .filter(|s| s.start >= start_time && (end_time == 0.0 || s.start <= end_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(entries: &[(f64, &str)]) -> Transcript {
        Transcript::Available(
            entries
                .iter()
                .map(|(start, text)| Segment::new(*start, *text))
                .collect(),
        )
    }

    fn indices(matches: &[(usize, &Segment)]) -> Vec<usize> {
        matches.iter().map(|(i, _)| *i).collect()
    }

    fn starts(entries: &[&Segment]) -> Vec<f64> {
        entries.iter().map(|s| s.start).collect()
    }

    #[test]
    fn test_single_segment_match() {
        let t = transcript(&[(0.0, "hello"), (5.0, "world peace"), (10.0, "now")]);

        let matches = find_matches(&t, "peace");
        assert_eq!(indices(&matches), vec![1]);

        let records = build_match_records(&t, &matches, 15.0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 1);
        assert!(!records[0].is_cross_segment());
        assert_eq!(starts(&records[0].context_before.entries), vec![0.0]);
        assert_eq!(starts(&records[0].context_after.entries), vec![10.0]);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let t = transcript(&[(0.0, "The Rust Book"), (3.0, "nothing here")]);
        assert_eq!(indices(&find_matches(&t, "rUsT")), vec![0]);
    }

    #[test]
    fn test_cross_segment_fallback() {
        let t = transcript(&[(0.0, "hello wor"), (5.0, "ld now")]);

        let matches = find_matches(&t, "world");
        assert_eq!(indices(&matches), vec![0, 1]);

        let records = build_match_records(&t, &matches, 15.0);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(record.is_cross_segment());
        assert_eq!(record.index, 0);
        assert_eq!(record.next_index, Some(1));
        assert_eq!(record.next_segment.map(|s| s.text.as_str()), Some("ld now"));
        assert!(record.context_before.entries.is_empty());
        assert!(record.context_after.entries.is_empty());
    }

    #[test]
    fn test_cross_segment_fallback_on_word_boundary() {
        let t = transcript(&[(0.0, "intro"), (3.0, "we love machine"), (6.0, "learning models")]);
        let matches = find_matches(&t, "machine learning");
        assert_eq!(indices(&matches), vec![1, 2]);
    }

    #[test]
    fn test_fallback_skipped_when_single_segment_matches() {
        let t = transcript(&[(0.0, "world"), (5.0, "peace talks"), (10.0, "peace")]);
        let matches = find_matches(&t, "peace");
        assert_eq!(indices(&matches), vec![1, 2]);

        let t = transcript(&[(0.0, "world"), (5.0, "peace"), (10.0, "world peace")]);
        assert_eq!(indices(&find_matches(&t, "world peace")), vec![2]);
    }

    #[test]
    fn test_direct_join_matches_across_word_break() {
        let t = transcript(&[(0.0, "xa"), (5.0, "by")]);
        assert_eq!(indices(&find_matches(&t, "ab")), vec![0, 1]);
    }

    #[test]
    fn test_three_segment_span_not_found() {
        let t = transcript(&[(0.0, "the quick"), (2.0, "brown"), (4.0, "fox jumps")]);
        assert!(find_matches(&t, "quick brown fox").is_empty());
    }

    #[test]
    fn test_overlapping_fallback_pairs_not_double_counted() {
        let t = transcript(&[(0.0, "x a"), (5.0, "a"), (10.0, "a y")]);
        let matches = find_matches(&t, "a a");
        assert_eq!(indices(&matches), vec![0, 1, 1, 2]);

        let records = build_match_records(&t, &matches, 15.0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].next_index, Some(1));
        assert_eq!(records[1].index, 2);
        assert!(!records[1].is_cross_segment());
    }

    #[test]
    fn test_adjacent_primary_matches_are_paired() {
        let t = transcript(&[(0.0, "go team"), (5.0, "team spirit"), (30.0, "team")]);
        let matches = find_matches(&t, "team");
        let records = build_match_records(&t, &matches, 10.0);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].next_index, Some(1));
        assert_eq!(records[1].index, 2);
        assert!(!records[1].is_cross_segment());
    }

    #[test]
    fn test_unavailable_transcript_yields_nothing() {
        let t = Transcript::Unavailable;
        assert!(find_matches(&t, "anything").is_empty());
        assert!(search(&t, "anything", 15.0).is_empty());
        assert!(slice_transcript(&t, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let t = transcript(&[(0.0, "hello")]);
        assert!(find_matches(&t, "").is_empty());
    }

    #[test]
    fn test_context_before_clipped_at_window() {
        let t = transcript(&[
            (80.0, "too early"),
            (90.0, "edge"),
            (95.0, "inside"),
            (100.0, "the match"),
        ]);
        let records = search(&t, "match", 10.0);

        assert_eq!(records.len(), 1);
        let before = &records[0].context_before;
        assert_eq!(before.available_seconds, 10.0);
        assert_eq!(starts(&before.entries), vec![90.0, 95.0]);
    }

    #[test]
    fn test_context_before_with_no_earlier_segments() {
        let t = transcript(&[(100.0, "the match"), (104.0, "after")]);
        let records = search(&t, "match", 15.0);

        let before = &records[0].context_before;
        assert_eq!(before.available_seconds, 15.0);
        assert!(before.entries.is_empty());
    }

    #[test]
    fn test_context_before_clipped_at_video_start() {
        let t = transcript(&[(1.0, "intro"), (4.0, "the match")]);
        let records = search(&t, "match", 15.0);

        let before = &records[0].context_before;
        assert_eq!(before.available_seconds, 4.0);
        assert_eq!(starts(&before.entries), vec![1.0]);
    }

    #[test]
    fn test_available_before_bounds() {
        let t = transcript(&[(0.0, "x"), (3.0, "x"), (20.0, "x"), (50.0, "x")]);
        let matches = find_matches(&t, "x");
        for record in build_match_records(&t, &matches, 15.0) {
            let available = record.context_before.available_seconds;
            assert!((0.0..=15.0).contains(&available));
            if record.match_time() > 15.0 {
                assert_eq!(available, 15.0);
            }
        }
    }

    #[test]
    fn test_context_after_clipped_at_last_segment() {
        let t = transcript(&[(0.0, "the match"), (4.0, "more"), (6.0, "end")]);
        let records = search(&t, "match", 15.0);

        let after = &records[0].context_after;
        assert_eq!(after.available_seconds, 6.0);
        assert_eq!(starts(&after.entries), vec![4.0, 6.0]);
    }

    #[test]
    fn test_context_after_upper_bound_inclusive() {
        let t = transcript(&[(0.0, "the match"), (15.0, "edge"), (15.5, "beyond")]);
        let records = search(&t, "match", 15.0);

        let after = &records[0].context_after;
        assert_eq!(starts(&after.entries), vec![15.0]);
        assert_eq!(after.available_seconds, 15.0);
    }

    #[test]
    fn test_cross_segment_extends_after_window() {
        let t = transcript(&[
            (0.0, "machine lear"),
            (10.0, "ning models"),
            (20.0, "are trained"),
            (24.0, "on data"),
            (40.0, "later"),
        ]);
        let records = search(&t, "machine learning", 15.0);

        assert_eq!(records.len(), 1);
        let after = &records[0].context_after;
        // window extends to 10 + 15 = 25, and excludes the paired segment itself
        assert_eq!(starts(&after.entries), vec![20.0, 24.0]);
        assert_eq!(after.available_seconds, 25.0);
    }

    #[test]
    fn test_after_context_keeps_segment_sharing_paired_start() {
        let t = transcript(&[
            (0.0, "hello wor"),
            (5.0, "ld now"),
            (5.0, "simultaneous caption"),
            (8.0, "later"),
        ]);
        let records = search(&t, "world", 15.0);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].next_index, Some(1));
        let texts: Vec<_> = records[0]
            .context_after
            .entries
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["simultaneous caption", "later"]);
    }

    #[test]
    fn test_context_before_keeps_segments_sharing_start() {
        let t = transcript(&[
            (90.0, "speaker one"),
            (90.0, "speaker two"),
            (100.0, "the match"),
        ]);
        let records = search(&t, "match", 15.0);

        assert_eq!(records.len(), 1);
        let texts: Vec<_> = records[0]
            .context_before
            .entries
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["speaker one", "speaker two"]);
    }

    #[test]
    fn test_last_segment_match_has_no_after_context() {
        let t = transcript(&[(0.0, "intro"), (30.0, "final words")]);
        let records = search(&t, "final", 15.0);

        let after = &records[0].context_after;
        assert!(after.entries.is_empty());
        assert_eq!(after.available_seconds, 0.0);
    }

    #[test]
    fn test_search_is_idempotent() {
        let t = transcript(&[(0.0, "a cat"), (5.0, "dog"), (9.0, "cat nap"), (30.0, "cat")]);
        let first = search(&t, "cat", 15.0);
        let second = search(&t, "cat", 15.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_records_follow_transcript_order() {
        let t = transcript(&[(0.0, "x"), (20.0, "y"), (40.0, "x"), (60.0, "y"), (80.0, "x")]);
        let records = search(&t, "x", 5.0);
        let order: Vec<_> = records.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 2, 4]);
    }

    #[test]
    fn test_slice_through_end() {
        let t = transcript(&[(0.0, "a"), (5.0, "b"), (10.0, "c")]);
        let slice = slice_transcript(&t, 5.0, 0.0);
        assert_eq!(starts(&slice), vec![5.0, 10.0]);
    }

    #[test]
    fn test_slice_bounded_range() {
        let t = transcript(&[(0.0, "a"), (5.0, "b"), (10.0, "c"), (15.0, "d")]);
        assert_eq!(starts(&slice_transcript(&t, 4.0, 10.0)), vec![5.0, 10.0]);
        assert_eq!(starts(&slice_transcript(&t, 0.0, 0.0)).len(), 4);
    }

    #[test]
    fn test_slice_empty_cases() {
        let t = transcript(&[(0.0, "a"), (5.0, "b"), (10.0, "c")]);
        assert!(slice_transcript(&t, 8.0, 6.0).is_empty());
        assert!(slice_transcript(&t, 11.0, 0.0).is_empty());
        assert!(slice_transcript(&t, 11.0, 20.0).is_empty());
    }
}
