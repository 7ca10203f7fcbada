//! Caption track listing, selection and json3 parsing.

use super::CaptionTrack;
use crate::error::{Result, TubetextError};
use crate::transcript::Segment;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Caption payload in YouTube's `json3` timed-text format.
#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"))
}

/// Parse a json3 caption payload into segments ordered by start time.
///
/// Events without text (window setup, line breaks) are dropped.
pub fn parse_json3(payload: &str) -> Result<Vec<Segment>> {
    let parsed: Json3 = serde_json::from_str(payload).map_err(|e| {
        TubetextError::VideoSource(format!("Failed to parse caption payload: {}", e))
    })?;

    let mut segments: Vec<Segment> = parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = whitespace().replace_all(raw.trim(), " ").into_owned();
            if text.is_empty() {
                None
            } else {
                Some(Segment::new(event.t_start_ms as f64 / 1000.0, text))
            }
        })
        .collect();

    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
    Ok(segments)
}

/// Read caption tracks out of `yt-dlp --dump-json` output.
///
/// Manual tracks come from `subtitles`, generated ones from
/// `automatic_captions`. Machine translations of the generated track are
/// skipped, as are tracks without a json3 rendition.
pub fn tracks_from_ytdlp(info: &serde_json::Value) -> Vec<CaptionTrack> {
    let mut tracks = Vec::new();
    collect_tracks(&info["subtitles"], false, &mut tracks);
    collect_tracks(&info["automatic_captions"], true, &mut tracks);
    tracks
}

fn collect_tracks(section: &serde_json::Value, is_generated: bool, out: &mut Vec<CaptionTrack>) {
    let Some(languages) = section.as_object() else {
        return;
    };

    for (code, formats) in languages {
        // yt-dlp exposes the stream chat replay as a pseudo subtitle track
        if code == "live_chat" {
            continue;
        }
        let Some(formats) = formats.as_array() else {
            continue;
        };

        let json3 = formats.iter().find(|f| f["ext"].as_str() == Some("json3"));
        let Some(url) = json3.and_then(|f| f["url"].as_str()) else {
            continue;
        };
        if is_generated && url.contains("tlang=") {
            continue;
        }

        let name = json3
            .and_then(|f| f["name"].as_str())
            .or_else(|| formats.iter().find_map(|f| f["name"].as_str()))
            .unwrap_or(code)
            .to_string();

        out.push(CaptionTrack {
            language_code: code.clone(),
            name,
            is_generated,
            url: url.to_string(),
        });
    }
}

/// Pick the best track for the preferred languages.
///
/// Languages are tried in order; for each, a manual track wins over a
/// generated one. A preference of `en` also accepts regional tracks such as
/// `en-US`, after any exact match.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    for language in languages {
        let language = language.to_lowercase();
        for is_generated in [false, true] {
            let candidates = || tracks.iter().filter(move |t| t.is_generated == is_generated);

            let exact = candidates().find(|t| t.language_code.to_lowercase() == language);
            let regional = || {
                candidates().find(|t| {
                    t.language_code
                        .to_lowercase()
                        .split('-')
                        .next()
                        .is_some_and(|primary| primary == language)
                })
            };

            if let Some(track) = exact.or_else(regional) {
                return Some(track);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(code: &str, is_generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_string(),
            name: code.to_string(),
            is_generated,
            url: format!("https://captions.example/{}", code),
        }
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_json3() {
        let payload = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 200000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 1500, "dDurationMs": 2000, "segs": [{"utf8": "hello "}, {"utf8": "there"}]},
                {"tStartMs": 3200, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 4000, "segs": [{"utf8": "general\nkenobi"}]}
            ]
        }"#;

        let segments = parse_json3(payload).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(1.5, "hello there"),
                Segment::new(4.0, "general kenobi"),
            ]
        );
    }

    #[test]
    fn test_parse_json3_rejects_garbage() {
        assert!(parse_json3("<transcript/>").is_err());
    }

    #[test]
    fn test_tracks_from_ytdlp() {
        let info = json!({
            "subtitles": {
                "de": [
                    {"ext": "vtt", "url": "https://c/de.vtt", "name": "German"},
                    {"ext": "json3", "url": "https://c/de.json3", "name": "German"}
                ],
                "live_chat": [{"ext": "json3", "url": "https://c/chat"}],
                "fr": [{"ext": "vtt", "url": "https://c/fr.vtt"}]
            },
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://c/en.json3?lang=en", "name": "English"}],
                "es": [{"ext": "json3", "url": "https://c/en.json3?lang=en&tlang=es", "name": "Spanish"}]
            }
        });

        let tracks = tracks_from_ytdlp(&info);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "de");
        assert_eq!(tracks[0].name, "German");
        assert!(!tracks[0].is_generated);
        assert_eq!(tracks[0].url, "https://c/de.json3");
        assert_eq!(tracks[1].language_code, "en");
        assert!(tracks[1].is_generated);
    }

    #[test]
    fn test_tracks_from_ytdlp_without_captions() {
        assert!(tracks_from_ytdlp(&json!({"title": "x"})).is_empty());
        assert!(tracks_from_ytdlp(&json!({"subtitles": null})).is_empty());
    }

    #[test]
    fn test_select_prefers_manual_track() {
        let tracks = vec![track("en", true), track("en", false)];
        let selected = select_track(&tracks, &langs(&["en"])).unwrap();
        assert!(!selected.is_generated);
    }

    #[test]
    fn test_select_follows_language_order() {
        let tracks = vec![track("en", false), track("de", true)];
        let selected = select_track(&tracks, &langs(&["de", "en"])).unwrap();
        assert_eq!(selected.language_code, "de");
    }

    #[test]
    fn test_select_regional_variant() {
        let tracks = vec![track("en-GB", false), track("en-US", false)];
        let selected = select_track(&tracks, &langs(&["en"])).unwrap();
        assert_eq!(selected.language_code, "en-GB");

        let tracks = vec![track("en-GB", false), track("en", true)];
        let selected = select_track(&tracks, &langs(&["en"])).unwrap();
        assert_eq!(selected.language_code, "en-GB");
    }

    #[test]
    fn test_select_none() {
        let tracks = vec![track("fr", false)];
        assert!(select_track(&tracks, &langs(&["en"])).is_none());
        assert!(select_track(&[], &langs(&["en"])).is_none());
    }
}
