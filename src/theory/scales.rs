use super::{Spelling, root_index, transpose};

/// Scale and mode interval patterns, semitones from the root.
/// Static domain data, keyed by a normalized name.
const SCALES: &[(&str, &[i32])] = &[
    ("major", &[0, 2, 4, 5, 7, 9, 11]),
    ("minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("locrian", &[0, 1, 3, 5, 6, 8, 10]),
    ("major pentatonic", &[0, 2, 4, 7, 9]),
    ("minor pentatonic", &[0, 3, 5, 7, 10]),
    ("blues", &[0, 3, 5, 6, 7, 10]),
    ("harmonic minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("melodic minor", &[0, 2, 3, 5, 7, 9, 11]),
    ("whole tone", &[0, 2, 4, 6, 8, 10]),
    ("chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
];

/// Normalize a spoken scale name to a registry key.
fn canonical_name(raw: &str) -> String {
    let collapsed = raw
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    match collapsed.as_str() {
        "ionian" | "major scale" => "major".to_string(),
        "aeolian" | "natural minor" | "minor scale" => "minor".to_string(),
        "pentatonic" => "major pentatonic".to_string(),
        "blues scale" => "blues".to_string(),
        "wholetone" => "whole tone".to_string(),
        other => other.to_string(),
    }
}

/// Interval pattern for a scale name, tolerant of case, hyphens, and
/// underscores. `None` for unknown scales.
pub fn scale_intervals(name: &str) -> Option<&'static [i32]> {
    let key = canonical_name(name);
    SCALES
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, intervals)| *intervals)
}

/// Spell out a scale's notes with the sharp table.
pub fn scale_notes(root: &str, name: &str) -> Option<Vec<&'static str>> {
    let pc = root_index(root)?;
    let intervals = scale_intervals(name)?;
    Some(
        intervals
            .iter()
            .map(|&iv| Spelling::Sharp.name(transpose(pc, iv)))
            .collect(),
    )
}

/// Registry names, for help output.
pub fn available_scales() -> Vec<&'static str> {
    SCALES.iter().map(|(n, _)| *n).collect()
}
