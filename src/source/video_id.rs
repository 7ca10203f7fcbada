//! Video identifier resolution.

use crate::error::{Result, TubetextError};
use url::Url;

/// Resolve a watch URL, live URL, short link or bare ID to a video ID.
///
/// Accepted forms:
/// - `dQw4w9WgXcQ`
/// - `https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=4557s`
/// - `https://www.youtube.com/live/USTG6sQlB6s`
/// - `https://youtu.be/dQw4w9WgXcQ`, `/embed/<id>`, `/shorts/<id>`
pub fn resolve(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TubetextError::InvalidInput(
            "Empty video URL or ID".to_string(),
        ));
    }

    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) if !input.contains('/') && !input.contains('?') => {
            return Ok(input.to_string());
        }
        Err(_) => Url::parse(&format!("https://{}", input)).map_err(|e| {
            TubetextError::InvalidInput(format!("Malformed video URL '{}': {}", input, e))
        })?,
    };

    let path: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if path.contains(&"live") {
        if let Some(id) = path.last().filter(|last| **last != "live") {
            return Ok(id.to_string());
        }
    }

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
        if !id.is_empty() {
            return Ok(id.into_owned());
        }
    }

    let host = url.host_str().unwrap_or_default();
    let id = match path.as_slice() {
        [id, ..] if host.ends_with("youtu.be") => Some(*id),
        ["embed" | "shorts" | "v", id, ..] => Some(*id),
        _ => None,
    };

    id.map(str::to_string).ok_or_else(|| {
        TubetextError::InvalidInput(format!("No video ID found in URL: {}", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bare_id() {
        assert_eq!(resolve("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(resolve("  dQw4w9WgXcQ \n").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_watch_urls() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=4557s").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLbG2RcJqc3nr7Ey0WY4UwFYju3ZhRhhef&index=6")
                .unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_resolve_live_url() {
        assert_eq!(
            resolve("https://www.youtube.com/live/USTG6sQlB6s").unwrap(),
            "USTG6sQlB6s"
        );
        assert_eq!(
            resolve("https://www.youtube.com/live/USTG6sQlB6s?si=abc").unwrap(),
            "USTG6sQlB6s"
        );
    }

    #[test]
    fn test_resolve_short_forms() {
        assert_eq!(resolve("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(
            resolve("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_resolve_without_scheme() {
        assert_eq!(
            resolve("youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(resolve(""), Err(TubetextError::InvalidInput(_))));
        assert!(matches!(
            resolve("https://www.youtube.com/watch?list=PL123"),
            Err(TubetextError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve("https://www.youtube.com/"),
            Err(TubetextError::InvalidInput(_))
        ));
    }
}
