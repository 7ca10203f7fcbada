//! MCP tool definitions for Tubetext.

use super::protocol::Tool;
use serde_json::json;

pub const GET_FULL_TRANSCRIPT: &str = "get_full_transcript";
pub const GET_VIDEO_INFORMATION: &str = "get_video_information";
pub const SEARCH_TRANSCRIPT: &str = "search_transcript";
pub const GET_TRANSCRIPT_SECTION: &str = "get_transcript_section";

/// Get all available tools.
pub fn get_tools(default_context_window: u32) -> Vec<Tool> {
    vec![
        Tool {
            name: GET_FULL_TRANSCRIPT.to_string(),
            description: "Get the full transcript of a YouTube video. \
                The transcript may be unpunctuated and unformatted when returned. When displaying \
                it to the user, format it to be readable: add punctuation and paragraphing where \
                necessary and remove unnecessary filler words. Do not include explanations, headers, \
                or phrases like \"Here is the transcript.\""
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    }
                },
                "required": ["video_url"]
            }),
        },
        Tool {
            name: GET_VIDEO_INFORMATION.to_string(),
            description: "Get information about a YouTube video including title, ID, \
                and available transcript languages."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    }
                },
                "required": ["video_url"]
            }),
        },
        Tool {
            name: SEARCH_TRANSCRIPT.to_string(),
            description: "Search for occurrences of a term in a YouTube video transcript. \
                Returns transcript sections containing the query with timestamps, including \
                context before and after each match. When displaying the results to the user, \
                prepend each result with its timestamped link in the format \
                [[HH:MM:SS]](https://www.youtube.com/watch?v=VIDEO_ID&t=XXs)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    },
                    "query": {
                        "type": "string",
                        "description": "Search term to find in the transcript"
                    },
                    "context_window": {
                        "type": "integer",
                        "description": "Seconds of context to include before and after each match",
                        "default": default_context_window,
                        "minimum": 0
                    }
                },
                "required": ["video_url", "query"]
            }),
        },
        Tool {
            name: GET_TRANSCRIPT_SECTION.to_string(),
            description: "Get a specific section of a YouTube video transcript. \
                The transcript may be unpunctuated and unformatted when returned. When displaying \
                it to the user, format it to be readable and precede each paragraph with a \
                timestamped link in the format [[HH:MM:SS]](https://www.youtube.com/watch?v=VIDEO_ID&t=XXs) \
                so the user can jump to that point in the video. Do not include explanations, \
                headers, or phrases like \"Here is the transcript.\""
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    },
                    "start_time": {
                        "type": "integer",
                        "description": "Start time in seconds",
                        "minimum": 0
                    },
                    "end_time": {
                        "type": "integer",
                        "description": "End time in seconds (0 for end of video)",
                        "default": 0,
                        "minimum": 0
                    }
                },
                "required": ["video_url", "start_time"]
            }),
        },
    ]
}
