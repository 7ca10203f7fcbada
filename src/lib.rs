//! Tubetext - Video Transcript Tools
//!
//! Fetches the captions of online videos and exposes them to AI agents as
//! tools: full transcripts, video information, phrase search with context,
//! and time-bounded sections.
//!
//! # Architecture
//!
//! - `transcript` - Segment model, search engine and text rendering
//! - `source` - Video ID resolution, caption and metadata sources
//! - `orchestrator` - The four tools, with failures turned into text
//! - `mcp` - MCP server over stdio
//! - `cli` - Command line interface and HTTP API
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust
//! use tubetext::transcript::{search, Segment, Transcript};
//!
//! let transcript = Transcript::from_segments(vec![
//!     Segment::new(0.0, "hello"),
//!     Segment::new(5.0, "world peace"),
//!     Segment::new(10.0, "now"),
//! ]);
//!
//! let records = search(&transcript, "peace", 15.0);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].index, 1);
//! assert!(!records[0].is_cross_segment());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod orchestrator;
pub mod source;
pub mod transcript;

pub use error::{Result, TubetextError};
