pub mod catalog;
pub mod config;
pub mod matching;
pub mod theory;

/// Audio file extensions we recognize as backing tracks
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "ogg", "aif", "aiff", "m4a", "aac", "opus",
];

/// Application name for XDG paths
pub const APP_NAME: &str = "woodshed";
