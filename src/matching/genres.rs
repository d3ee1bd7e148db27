/// Normalize a genre string for comparison: lowercase, trimmed, internal
/// whitespace collapsed to single spaces.
pub fn normalize_genre(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Genre synonym groups. Two normalized genres in the same group score as a
/// near-match even when the strings share nothing.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["blues", "blue", "rhythm and blues", "r&b"],
    &["rock", "rock and roll", "rock n roll", "classic rock", "hard rock"],
    &["jazz", "swing", "bebop", "fusion"],
    &["pop", "pop rock", "synth pop", "indie pop"],
    &["funk", "funky", "groove"],
    &["soul", "motown", "neo soul", "gospel"],
    &["country", "bluegrass", "americana"],
    &["folk", "acoustic", "singer songwriter"],
    &["electronic", "edm", "house", "techno", "dance"],
    &["hip hop", "hiphop", "rap", "trap"],
    &["latin", "bossa nova", "samba", "salsa"],
    &["metal", "heavy metal", "thrash"],
];

/// Whether two normalized genres share a synonym group.
pub fn same_synonym_group(a: &str, b: &str) -> bool {
    SYNONYM_GROUPS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}

/// Genres recognized by the free-text command parser, in scan order.
/// Multi-word names come first so "rhythm and blues" wins before "blues"
/// gets a chance to match.
pub const KNOWN_GENRES: &[&str] = &[
    "bossa nova",
    "rhythm and blues",
    "rock and roll",
    "hip hop",
    "heavy metal",
    "hard rock",
    "classic rock",
    "neo soul",
    "blues",
    "jazz",
    "rock",
    "metal",
    "funk",
    "soul",
    "gospel",
    "country",
    "bluegrass",
    "folk",
    "pop",
    "reggae",
    "latin",
    "samba",
    "salsa",
    "swing",
    "bebop",
    "fusion",
    "disco",
    "house",
    "techno",
    "edm",
    "electronic",
    "ambient",
    "punk",
    "rap",
    "trap",
];
