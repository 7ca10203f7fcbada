//! CLI module for Tubetext.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tubetext - fetch and search video transcripts
///
/// Runs as an MCP server for AI assistants, as an HTTP API, or directly from
/// the command line.
#[derive(Parser, Debug)]
#[command(name = "tubetext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TUBETEXT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the full timestamped transcript of a video
    Transcript {
        /// YouTube URL or video ID
        video: String,
    },

    /// Show title and available caption languages of a video
    Info {
        /// YouTube URL or video ID
        video: String,
    },

    /// Search a video transcript for a phrase
    Search {
        /// YouTube URL or video ID
        video: String,

        /// Phrase to search for (case-insensitive)
        query: String,

        /// Seconds of context before and after each match
        #[arg(short = 'w', long)]
        context_window: Option<u32>,
    },

    /// Print the part of a transcript between two times
    Section {
        /// YouTube URL or video ID
        video: String,

        /// Start time in seconds
        start: f64,

        /// End time in seconds (0 for end of video)
        #[arg(default_value = "0")]
        end: f64,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "tubetext",
            "-vv",
            "search",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "never gonna",
            "-w",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Search {
                video,
                query,
                context_window,
            } => {
                assert_eq!(video, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
                assert_eq!(query, "never gonna");
                assert_eq!(context_window, Some(30));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_section_default_end() {
        let cli = Cli::try_parse_from(["tubetext", "section", "dQw4w9WgXcQ", "60"]).unwrap();
        match cli.command {
            Commands::Section { start, end, .. } => {
                assert_eq!(start, 60.0);
                assert_eq!(end, 0.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_section_fractional_times() {
        let cli = Cli::try_parse_from(["tubetext", "section", "dQw4w9WgXcQ", "12.5", "30.75"]).unwrap();
        match cli.command {
            Commands::Section { start, end, .. } => {
                assert_eq!(start, 12.5);
                assert_eq!(end, 30.75);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
