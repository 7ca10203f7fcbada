//! Configuration module for Tubetext.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, SearchSettings, ServerSettings, Settings, YoutubeSettings};
