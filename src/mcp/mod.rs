//! MCP (Model Context Protocol) server for Tubetext.
//!
//! Allows AI assistants like Claude to fetch and search video transcripts.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
