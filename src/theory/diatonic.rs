use super::{PitchClass, Spelling, root_index, transpose};

/// Chord quality at a major-key scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeQuality {
    Major,
    Minor7,
    HalfDim7,
}

impl DegreeQuality {
    pub fn label(self) -> &'static str {
        match self {
            DegreeQuality::Major => "major",
            DegreeQuality::Minor7 => "minor",
            DegreeQuality::HalfDim7 => "half-diminished",
        }
    }
}

/// The seven degrees of a major key: numeral, semitone offset from the tonic,
/// and quality. Constant domain data, transposed per call.
const DEGREES: [(&str, i32, DegreeQuality); 7] = [
    ("I", 0, DegreeQuality::Major),
    ("ii", 2, DegreeQuality::Minor7),
    ("iii", 4, DegreeQuality::Minor7),
    ("IV", 5, DegreeQuality::Major),
    ("V", 7, DegreeQuality::Major),
    ("vi", 9, DegreeQuality::Minor7),
    ("vii\u{00B0}", 11, DegreeQuality::HalfDim7),
];

/// Minor-feel borrowings: lowercase tokens that override the diatonic
/// quality at their degree.
const BORROWED_MINOR: [(&str, i32); 3] = [("i", 0), ("iv", 5), ("v", 7)];

/// Chromatic degrees reached with a flat prefix, with their seventh
/// renderings (bVII takes the backdoor dominant, bVI and bIII stay major).
const CHROMATIC_FLAT: [(&str, i32, &str); 3] = [
    ("VII", 10, "7"),
    ("VI", 8, "maj7"),
    ("III", 3, "maj7"),
];

/// A chord at one degree of a major key.
#[derive(Debug, Clone, PartialEq)]
pub struct DiatonicChord {
    pub numeral: &'static str,
    /// Root spelled with the flat table (progression-friendly).
    pub root: String,
    /// Rendered symbol: "G", "Am", "Bm7b5".
    pub symbol: String,
    pub quality: DegreeQuality,
}

fn degree_symbol(root: &str, quality: DegreeQuality) -> String {
    match quality {
        DegreeQuality::Major => root.to_string(),
        DegreeQuality::Minor7 => format!("{root}m"),
        DegreeQuality::HalfDim7 => format!("{root}m7b5"),
    }
}

/// The seven diatonic chords of a major key. `None` only when the key root
/// is unresolvable.
pub fn diatonic_chords(key_root: &str) -> Option<Vec<DiatonicChord>> {
    let tonic = root_index(key_root)?;
    Some(
        DEGREES
            .iter()
            .map(|&(numeral, offset, quality)| {
                let root = Spelling::Flat.name(transpose(tonic, offset)).to_string();
                let symbol = degree_symbol(&root, quality);
                DiatonicChord {
                    numeral,
                    root,
                    symbol,
                    quality,
                }
            })
            .collect(),
    )
}

/// Resolve one roman token against a tonic.
fn resolve_token(tonic: PitchClass, token: &str, use_sevenths: bool) -> String {
    let (flat, body) = match token.strip_prefix('b') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    // Explicit minor-feel borrowings: lowercase i/iv/v.
    if let Some(&(_, offset)) = BORROWED_MINOR.iter().find(|&&(n, _)| n == body) {
        let root = Spelling::Flat.name(transpose(tonic, offset));
        let suffix = if use_sevenths { "m7" } else { "m" };
        return format!("{root}{suffix}");
    }

    // The standard diatonic set (case-sensitive).
    if !flat {
        if let Some(&(_, offset, quality)) = DEGREES.iter().find(|&&(n, _, _)| n == body) {
            let root = Spelling::Flat.name(transpose(tonic, offset));
            let suffix = match quality {
                DegreeQuality::Major => {
                    if use_sevenths {
                        "maj7"
                    } else {
                        ""
                    }
                }
                DegreeQuality::Minor7 => {
                    if use_sevenths {
                        "m7"
                    } else {
                        "m"
                    }
                }
                DegreeQuality::HalfDim7 => "m7b5",
            };
            return format!("{root}{suffix}");
        }
    }

    // Flat-prefixed chromatic degrees.
    if flat {
        if let Some(&(_, offset, seventh)) = CHROMATIC_FLAT.iter().find(|&&(n, _, _)| n == body) {
            let root = Spelling::Flat.name(transpose(tonic, offset));
            let suffix = if use_sevenths { seventh } else { "" };
            return format!("{root}{suffix}");
        }
    }

    // Last resort: pass the token through verbatim, never drop it.
    token.to_string()
}

/// Resolve a roman-numeral progression to concrete chord symbols in a major
/// key. Pure and idempotent; unknown tokens pass through verbatim.
/// `None` only when the key root is unresolvable.
pub fn resolve_progression_in_key(
    key_root: &str,
    tokens: &[&str],
    use_sevenths: bool,
) -> Option<Vec<String>> {
    let tonic = root_index(key_root)?;
    Some(
        tokens
            .iter()
            .map(|t| resolve_token(tonic, t, use_sevenths))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Diatonic table ===

    #[test]
    fn c_major_diatonic_chords() {
        let chords = diatonic_chords("C").unwrap();
        let symbols: Vec<&str> = chords.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "Dm", "Em", "F", "G", "Am", "Bm7b5"]);
    }

    #[test]
    fn fifth_degree_of_c_is_g_major() {
        let chords = diatonic_chords("C").unwrap();
        let v = &chords[4];
        assert_eq!(v.numeral, "V");
        assert_eq!(v.root, "G");
        assert_eq!(v.symbol, "G");
        assert_eq!(v.quality, DegreeQuality::Major);
    }

    #[test]
    fn diatonic_uses_flat_spelling() {
        let chords = diatonic_chords("F").unwrap();
        // IV of F is Bb, not A#.
        assert_eq!(chords[3].symbol, "Bb");
    }

    #[test]
    fn diatonic_bad_key_is_none() {
        assert!(diatonic_chords("Z").is_none());
        assert!(diatonic_chords("").is_none());
    }

    // === Progression resolution ===

    #[test]
    fn axis_progression_in_g() {
        let chords = resolve_progression_in_key("G", &["I", "V", "vi", "IV"], false).unwrap();
        assert_eq!(chords, vec!["G", "D", "Em", "C"]);
    }

    #[test]
    fn sevenths_extend_diatonic_degrees() {
        let chords = resolve_progression_in_key("C", &["ii", "V", "I"], true).unwrap();
        assert_eq!(chords, vec!["Dm7", "Gmaj7", "Cmaj7"]);
    }

    #[test]
    fn half_diminished_keeps_seventh_either_way() {
        let plain = resolve_progression_in_key("C", &["vii\u{00B0}"], false).unwrap();
        let seventh = resolve_progression_in_key("C", &["vii\u{00B0}"], true).unwrap();
        assert_eq!(plain, vec!["Bm7b5"]);
        assert_eq!(seventh, vec!["Bm7b5"]);
    }

    #[test]
    fn lowercase_borrowings_render_minor() {
        let chords = resolve_progression_in_key("A", &["i", "iv", "v"], false).unwrap();
        assert_eq!(chords, vec!["Am", "Dm", "Em"]);
        let sevenths = resolve_progression_in_key("A", &["i", "iv", "v"], true).unwrap();
        assert_eq!(sevenths, vec!["Am7", "Dm7", "Em7"]);
    }

    #[test]
    fn chromatic_flat_degrees() {
        let chords = resolve_progression_in_key("C", &["bVII", "bVI", "bIII"], false).unwrap();
        assert_eq!(chords, vec!["Bb", "Ab", "Eb"]);
        // With sevenths, bVII is the backdoor dominant; bVI and bIII stay major.
        let sevenths = resolve_progression_in_key("C", &["bVII", "bVI", "bIII"], true).unwrap();
        assert_eq!(sevenths, vec!["Bb7", "Abmaj7", "Ebmaj7"]);
    }

    #[test]
    fn unknown_tokens_pass_through_verbatim() {
        let chords = resolve_progression_in_key("C", &["I", "N6", "bII", "V"], false).unwrap();
        assert_eq!(chords, vec!["C", "N6", "bII", "G"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let tokens = ["I", "bVII", "iv", "V", "weird"];
        let a = resolve_progression_in_key("E", &tokens, true).unwrap();
        let b = resolve_progression_in_key("E", &tokens, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resolution_bad_key_is_none() {
        assert!(resolve_progression_in_key("X", &["I"], false).is_none());
    }
}
