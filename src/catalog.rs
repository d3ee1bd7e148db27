use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

use crate::SUPPORTED_EXTENSIONS;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No track named \"{0}\" in the catalog")]
    UnknownTrack(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Metadata attached to a backing track. Every field is optional; values
/// arrive from an external analysis step or manual tagging, never from
/// audio processing in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    /// Recommended scales to solo with over this track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Vec<String>>,
    /// When the track was registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<DateTime<Utc>>,
}

/// A backing track in the catalog, keyed by filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackingTrack {
    pub filename: String,
    #[serde(default)]
    pub meta: TrackMeta,
}

impl BackingTrack {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            meta: TrackMeta::default(),
        }
    }
}

/// Load the catalog from a JSON file. A missing file is an empty catalog,
/// not an error.
pub fn load(path: &Path) -> Result<Vec<BackingTrack>> {
    if !path.exists() {
        log::debug!("No catalog at {}, starting empty", path.display());
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write the catalog back out as pretty-printed JSON.
pub fn save(path: &Path, tracks: &[BackingTrack]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let contents = serde_json::to_string_pretty(tracks)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub struct ScanResult {
    pub scanned: usize,
    pub new: usize,
    pub skipped: usize,
}

/// Walk directories for audio files and register unseen ones with empty
/// metadata (key/genre/bpm arrive later via `tag` or batch analysis).
pub fn scan_into(tracks: &mut Vec<BackingTrack>, paths: &[String]) -> ScanResult {
    let mut result = ScanResult {
        scanned: 0,
        new: 0,
        skipped: 0,
    };

    for path in paths {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            result.scanned += 1;

            let filename = match entry.path().file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    log::warn!("Skipping undecodable filename: {}", entry.path().display());
                    continue;
                }
            };

            if tracks.iter().any(|t| t.filename == filename) {
                result.skipped += 1;
                continue;
            }

            tracks.push(BackingTrack {
                filename,
                meta: TrackMeta {
                    added: Some(Utc::now()),
                    ..TrackMeta::default()
                },
            });
            result.new += 1;
        }
    }

    result
}

/// Set metadata fields on one catalog entry. `None` fields are left alone.
pub fn tag_track(
    tracks: &mut [BackingTrack],
    filename: &str,
    key: Option<String>,
    genre: Option<String>,
    bpm: Option<f64>,
    scales: Option<Vec<String>>,
) -> Result<()> {
    let track = tracks
        .iter_mut()
        .find(|t| t.filename == filename)
        .ok_or_else(|| CatalogError::UnknownTrack(filename.to_string()))?;

    if key.is_some() {
        track.meta.key = key;
    }
    if genre.is_some() {
        track.meta.genre = genre;
    }
    if bpm.is_some() {
        track.meta.bpm = bpm;
    }
    if scales.is_some() {
        track.meta.scales = scales;
    }
    Ok(())
}
