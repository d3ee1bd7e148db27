use std::sync::LazyLock;

use regex::Regex;

use super::genres::KNOWN_GENRES;
use super::{SearchCriteria, normalize_key};

// Tempo: "90 bpm", "at 120", "140 beats"
static BPM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?P<a>\d{2,3})\s*bpm
      | \bat\s+(?P<b>\d{2,3})\b
      | \b(?P<c>\d{2,3})\s+beats\b",
    )
    .unwrap()
});

// Key, preferred form: "in A", "in f# minor", "in the key of bb"
// The trailing class stands in for a word boundary after an optional
// accidental ("#" is not a word character, so \b would misfire there).
static KEY_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \bin\s+ (?:the\s+)? (?:key\s+of\s+)?
        (?P<note>[a-g]) (?P<acc>[\#b])?
        (?:\s*(?P<mode>major|minor|maj|min|m))?
        (?:[^a-z0-9]|$)",
    )
    .unwrap()
});

// Key, bare form: "a minor groove", "e major"
static KEY_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(?P<note>[a-g]) (?P<acc>[\#b])?
        \s+ (?P<mode>major|minor|maj|min|m)
        (?:[^a-z0-9]|$)",
    )
    .unwrap()
});

// Key, "key of" form without "in": "key of g"
static KEY_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \bkey\s+of\s+
        (?P<note>[a-g]) (?P<acc>[\#b])?
        (?:\s*(?P<mode>major|minor|maj|min|m))?
        (?:[^a-z0-9]|$)",
    )
    .unwrap()
});

/// Scale and mode names the parser recognizes, in scan order (multi-word
/// first, and "mixolydian" before its substring "lydian"). Bare
/// "major"/"minor" are deliberately absent; they belong to key phrases.
const SCALE_TERMS: &[&str] = &[
    "major pentatonic",
    "minor pentatonic",
    "blues scale",
    "harmonic minor",
    "melodic minor",
    "whole tone",
    "pentatonic",
    "dorian",
    "phrygian",
    "mixolydian",
    "lydian",
    "locrian",
    "aeolian",
    "ionian",
    "chromatic",
];

/// Extract search criteria from a free-text request like
/// "play me a blues backing track in A at 90 bpm".
///
/// Extraction order is fixed: bpm, then genre (before key, so "blues in A"
/// keeps its genre word out of the key phrase), then key, then scale. Each
/// extraction is independent and best-effort.
pub fn parse_command(text: &str) -> SearchCriteria {
    let lower = text.to_lowercase();
    SearchCriteria {
        bpm: extract_bpm(&lower),
        genre: extract_genre(&lower),
        key: extract_key(&lower),
        scale: extract_scale(&lower),
        ..SearchCriteria::default()
    }
}

fn extract_bpm(text: &str) -> Option<f64> {
    for caps in BPM_RE.captures_iter(text) {
        let digits = caps
            .name("a")
            .or_else(|| caps.name("b"))
            .or_else(|| caps.name("c"))?;
        if let Ok(v) = digits.as_str().parse::<f64>() {
            if (40.0..=240.0).contains(&v) {
                return Some(v);
            }
        }
    }
    None
}

fn extract_genre(text: &str) -> Option<String> {
    KNOWN_GENRES
        .iter()
        .find(|g| text.contains(*g))
        .map(|g| g.to_string())
}

fn extract_key(text: &str) -> Option<String> {
    for re in [&*KEY_IN_RE, &*KEY_BARE_RE, &*KEY_OF_RE] {
        if let Some(caps) = re.captures(text) {
            let note = caps.name("note").map(|m| m.as_str()).unwrap_or_default();
            let acc = caps.name("acc").map(|m| m.as_str()).unwrap_or_default();
            let mode = match caps.name("mode").map(|m| m.as_str()) {
                Some("minor") | Some("min") | Some("m") => "m",
                _ => "",
            };
            return Some(normalize_key(&format!("{note}{acc}{mode}")));
        }
    }
    None
}

fn extract_scale(text: &str) -> Option<String> {
    SCALE_TERMS
        .iter()
        .find(|s| text.contains(*s))
        .map(|s| s.to_string())
}
