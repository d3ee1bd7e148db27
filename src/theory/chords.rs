use super::{PitchClass, Spelling, root_index, transpose};

/// Every chord quality the resolver knows about. Closed set; each variant owns
/// a fixed interval formula in the static registry below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Dim,
    Aug,
    Dom7,
    Maj7,
    Min7,
    Dim7,
    HalfDim7,
    Aug7,
    Sus2,
    Sus4,
    Add9,
    Nine,
    Maj9,
    Min9,
    Eleven,
    Maj11,
    Thirteen,
    Maj13,
    Six,
    Min6,
    SixNine,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 23] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dim,
        ChordQuality::Aug,
        ChordQuality::Dom7,
        ChordQuality::Maj7,
        ChordQuality::Min7,
        ChordQuality::Dim7,
        ChordQuality::HalfDim7,
        ChordQuality::Aug7,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Add9,
        ChordQuality::Nine,
        ChordQuality::Maj9,
        ChordQuality::Min9,
        ChordQuality::Eleven,
        ChordQuality::Maj11,
        ChordQuality::Thirteen,
        ChordQuality::Maj13,
        ChordQuality::Six,
        ChordQuality::Min6,
        ChordQuality::SixNine,
    ];

    /// Semitone offsets from the root. Offsets above 11 are reduced mod 12
    /// when spelled (extensions live an octave up).
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dim => &[0, 3, 6],
            ChordQuality::Aug => &[0, 4, 8],
            ChordQuality::Dom7 => &[0, 4, 7, 10],
            ChordQuality::Maj7 => &[0, 4, 7, 11],
            ChordQuality::Min7 => &[0, 3, 7, 10],
            ChordQuality::Dim7 => &[0, 3, 6, 9],
            ChordQuality::HalfDim7 => &[0, 3, 6, 10],
            ChordQuality::Aug7 => &[0, 4, 8, 10],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Add9 => &[0, 4, 7, 14],
            ChordQuality::Nine => &[0, 4, 7, 10, 14],
            ChordQuality::Maj9 => &[0, 4, 7, 11, 14],
            ChordQuality::Min9 => &[0, 3, 7, 10, 14],
            ChordQuality::Eleven => &[0, 4, 7, 10, 14, 17],
            ChordQuality::Maj11 => &[0, 4, 7, 11, 14, 17],
            ChordQuality::Thirteen => &[0, 4, 7, 10, 14, 17, 21],
            ChordQuality::Maj13 => &[0, 4, 7, 11, 14, 17, 21],
            ChordQuality::Six => &[0, 4, 7, 9],
            ChordQuality::Min6 => &[0, 3, 7, 9],
            ChordQuality::SixNine => &[0, 4, 7, 9, 14],
        }
    }

    /// Canonical symbol suffix ("" for major, "m7" for minor seventh, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dim => "dim",
            ChordQuality::Aug => "aug",
            ChordQuality::Dom7 => "7",
            ChordQuality::Maj7 => "maj7",
            ChordQuality::Min7 => "m7",
            ChordQuality::Dim7 => "dim7",
            ChordQuality::HalfDim7 => "m7b5",
            ChordQuality::Aug7 => "aug7",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Add9 => "add9",
            ChordQuality::Nine => "9",
            ChordQuality::Maj9 => "maj9",
            ChordQuality::Min9 => "m9",
            ChordQuality::Eleven => "11",
            ChordQuality::Maj11 => "maj11",
            ChordQuality::Thirteen => "13",
            ChordQuality::Maj13 => "maj13",
            ChordQuality::Six => "6",
            ChordQuality::Min6 => "m6",
            ChordQuality::SixNine => "6/9",
        }
    }

    /// Spoken name, for display and speech output.
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Dim => "diminished",
            ChordQuality::Aug => "augmented",
            ChordQuality::Dom7 => "dominant seventh",
            ChordQuality::Maj7 => "major seventh",
            ChordQuality::Min7 => "minor seventh",
            ChordQuality::Dim7 => "diminished seventh",
            ChordQuality::HalfDim7 => "half-diminished seventh",
            ChordQuality::Aug7 => "augmented seventh",
            ChordQuality::Sus2 => "suspended second",
            ChordQuality::Sus4 => "suspended fourth",
            ChordQuality::Add9 => "added ninth",
            ChordQuality::Nine => "dominant ninth",
            ChordQuality::Maj9 => "major ninth",
            ChordQuality::Min9 => "minor ninth",
            ChordQuality::Eleven => "dominant eleventh",
            ChordQuality::Maj11 => "major eleventh",
            ChordQuality::Thirteen => "dominant thirteenth",
            ChordQuality::Maj13 => "major thirteenth",
            ChordQuality::Six => "major sixth",
            ChordQuality::Min6 => "minor sixth",
            ChordQuality::SixNine => "six-nine",
        }
    }

    /// One-line theory description.
    pub fn description(self) -> &'static str {
        match self {
            ChordQuality::Major => "Root, major third, perfect fifth. The bright, stable home base.",
            ChordQuality::Minor => "Root, minor third, perfect fifth. Darker and more melancholy than major.",
            ChordQuality::Dim => "Two stacked minor thirds. Tense, wants to resolve.",
            ChordQuality::Aug => "Major third plus augmented fifth. Unsettled, dreamlike.",
            ChordQuality::Dom7 => "Major triad with a flat seventh. The engine of blues and the V chord of jazz.",
            ChordQuality::Maj7 => "Major triad with a major seventh. Smooth and jazzy.",
            ChordQuality::Min7 => "Minor triad with a flat seventh. The workhorse of soul and funk.",
            ChordQuality::Dim7 => "Minor thirds stacked all the way up. The classic suspense chord.",
            ChordQuality::HalfDim7 => "Diminished triad with a flat seventh. The ii chord of minor keys.",
            ChordQuality::Aug7 => "Dominant seventh with a raised fifth. Altered-dominant bite.",
            ChordQuality::Sus2 => "The second replaces the third. Open and airy.",
            ChordQuality::Sus4 => "The fourth replaces the third. Unresolved until it drops to the third.",
            ChordQuality::Add9 => "Major triad with a ninth on top. Shimmery pop color.",
            ChordQuality::Nine => "Dominant seventh plus the ninth. A funk staple.",
            ChordQuality::Maj9 => "Major seventh plus the ninth. Lush ballad color.",
            ChordQuality::Min9 => "Minor seventh plus the ninth. Smoky and smooth.",
            ChordQuality::Eleven => "Dominant ninth plus the eleventh. Thick gospel voicing.",
            ChordQuality::Maj11 => "Major ninth plus the eleventh. Floating, modern.",
            ChordQuality::Thirteen => "The full dominant stack through the thirteenth. Big-band color.",
            ChordQuality::Maj13 => "Major ninth plus the thirteenth. The richest major color.",
            ChordQuality::Six => "Major triad with an added sixth. Vintage sweetness.",
            ChordQuality::Min6 => "Minor triad with a major sixth. Film-noir minor.",
            ChordQuality::SixNine => "Major triad with sixth and ninth. The classic jazz ending chord.",
        }
    }
}

/// A chord name parsed from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChord {
    /// Canonical root spelling as written ("F#", "Bb").
    pub root: String,
    pub root_pc: PitchClass,
    pub quality: ChordQuality,
}

impl ParsedChord {
    /// Full chord symbol ("F#m7").
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }
}

/// Parse a chord name like "F#m7", "Bbmaj7", "c minor".
///
/// The leading `[A-Ga-g][#b]?` is the root; the rest selects a quality via
/// word forms, an alias table, then canonical suffixes. An unrecognized
/// suffix deliberately falls back to major so voice-transcribed names degrade
/// gracefully instead of erroring. Returns `None` only when the root itself
/// is not a note.
pub fn parse_chord_name(text: &str) -> Option<ParsedChord> {
    let stripped: String = text.split_whitespace().collect();
    let mut chars = stripped.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() || !('a'..='g').contains(&letter.to_ascii_lowercase()) {
        return None;
    }
    let rest = chars.as_str();
    let (accidental, remainder) = match rest.chars().next() {
        Some(c @ ('#' | 'b')) => (Some(c), &rest[1..]),
        _ => (None, rest),
    };

    let mut root = String::new();
    root.push(letter.to_ascii_uppercase());
    if let Some(acc) = accidental {
        root.push(acc);
    }
    let root_pc = root_index(&root)?;

    let quality = quality_from_suffix(&remainder.to_lowercase());
    Some(ParsedChord {
        root,
        root_pc,
        quality,
    })
}

/// Resolve a lowercased suffix to a quality, falling back to major.
fn quality_from_suffix(raw: &str) -> ChordQuality {
    if let Some(q) = lookup_suffix(raw) {
        return q;
    }
    // Retry with accidental characters stripped, so noisy transcriptions
    // like "sus4b" still land near a real quality.
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '#' | 'b' | '\u{266F}' | '\u{266D}'))
        .collect();
    lookup_suffix(&cleaned).unwrap_or(ChordQuality::Major)
}

fn lookup_suffix(q: &str) -> Option<ChordQuality> {
    if let Some(quality) = alias(q) {
        return Some(quality);
    }
    ChordQuality::ALL.iter().copied().find(|c| c.suffix() == q)
}

/// Common shorthand not covered by the canonical suffixes.
fn alias(q: &str) -> Option<ChordQuality> {
    let quality = match q {
        "" | "maj" | "major" => ChordQuality::Major,
        "m" | "min" | "minor" | "-" => ChordQuality::Minor,
        "o" | "\u{00B0}" => ChordQuality::Dim,
        "o7" | "\u{00B0}7" => ChordQuality::Dim7,
        "+" | "+5" => ChordQuality::Aug,
        "+7" | "7#5" => ChordQuality::Aug7,
        "dom7" | "dominant7" => ChordQuality::Dom7,
        "major7" => ChordQuality::Maj7,
        "min7" | "minor7" | "-7" => ChordQuality::Min7,
        "min7b5" | "-7b5" | "\u{00F8}" | "\u{00F8}7" => ChordQuality::HalfDim7,
        "major9" => ChordQuality::Maj9,
        "min9" | "minor9" => ChordQuality::Min9,
        "major11" => ChordQuality::Maj11,
        "major13" => ChordQuality::Maj13,
        "min6" | "minor6" => ChordQuality::Min6,
        "69" => ChordQuality::SixNine,
        "2" => ChordQuality::Sus2,
        "4" => ChordQuality::Sus4,
        _ => return None,
    };
    Some(quality)
}

/// Spell out a chord's notes with the sharp table.
/// Length always equals the quality's formula length. `None` only when the
/// root is unresolvable.
pub fn notes_of(root: &str, quality: ChordQuality) -> Option<Vec<&'static str>> {
    let pc = root_index(root)?;
    Some(notes_of_pc(pc, quality))
}

/// Spell out a chord's notes from an already-resolved pitch class.
pub fn notes_of_pc(pc: PitchClass, quality: ChordQuality) -> Vec<&'static str> {
    quality
        .intervals()
        .iter()
        .map(|&iv| Spelling::Sharp.name(transpose(pc, iv)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Parsing ===

    #[test]
    fn parse_plain_major_and_minor() {
        let c = parse_chord_name("C").unwrap();
        assert_eq!(c.root, "C");
        assert_eq!(c.quality, ChordQuality::Major);

        let am = parse_chord_name("Am").unwrap();
        assert_eq!(am.root, "A");
        assert_eq!(am.quality, ChordQuality::Minor);
    }

    #[test]
    fn parse_accidentals_and_case() {
        let fs = parse_chord_name("f#m7").unwrap();
        assert_eq!(fs.root, "F#");
        assert_eq!(fs.quality, ChordQuality::Min7);

        let bb = parse_chord_name("bbMAJ7").unwrap();
        assert_eq!(bb.root, "Bb");
        assert_eq!(bb.quality, ChordQuality::Maj7);
    }

    #[test]
    fn parse_word_forms() {
        assert_eq!(
            parse_chord_name("c minor").unwrap().quality,
            ChordQuality::Minor
        );
        assert_eq!(
            parse_chord_name("G major").unwrap().quality,
            ChordQuality::Major
        );
        assert_eq!(
            parse_chord_name("d min7").unwrap().quality,
            ChordQuality::Min7
        );
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(
            parse_chord_name("Cm7b5").unwrap().quality,
            ChordQuality::HalfDim7
        );
        assert_eq!(
            parse_chord_name("C\u{00F8}7").unwrap().quality,
            ChordQuality::HalfDim7
        );
        assert_eq!(
            parse_chord_name("G69").unwrap().quality,
            ChordQuality::SixNine
        );
        assert_eq!(
            parse_chord_name("G6/9").unwrap().quality,
            ChordQuality::SixNine
        );
        assert_eq!(parse_chord_name("F+").unwrap().quality, ChordQuality::Aug);
        assert_eq!(parse_chord_name("Bo7").unwrap().quality, ChordQuality::Dim7);
    }

    #[test]
    fn unknown_suffix_falls_back_to_major() {
        // Deliberate leniency: ambiguous suffixes become major, not an error.
        assert_eq!(
            parse_chord_name("Cxyz").unwrap().quality,
            ChordQuality::Major
        );
        assert_eq!(
            parse_chord_name("G5").unwrap().quality,
            ChordQuality::Major
        );
    }

    #[test]
    fn parse_never_panics_and_rejects_bad_roots() {
        assert_eq!(parse_chord_name(""), None);
        assert_eq!(parse_chord_name("H7"), None);
        assert_eq!(parse_chord_name("!!"), None);
        assert_eq!(parse_chord_name("123"), None);
        assert_eq!(parse_chord_name("\u{1F3B8}"), None);
        // "Cb" parses a Cb root, which no spelling table contains.
        assert_eq!(parse_chord_name("Cb"), None);
    }

    #[test]
    fn symbol_round_trip() {
        let p = parse_chord_name("F#m7").unwrap();
        assert_eq!(p.symbol(), "F#m7");
    }

    // === Note spelling ===

    #[test]
    fn notes_of_fsharp_minor_seven() {
        assert_eq!(
            notes_of("F#", ChordQuality::Min7).unwrap(),
            vec!["F#", "A", "C#", "E"]
        );
    }

    #[test]
    fn notes_use_sharp_spelling() {
        assert_eq!(
            notes_of("Eb", ChordQuality::Major).unwrap(),
            vec!["D#", "G", "A#"]
        );
    }

    #[test]
    fn note_count_matches_formula() {
        for q in ChordQuality::ALL {
            let notes = notes_of("C", q).unwrap();
            assert_eq!(notes.len(), q.intervals().len(), "{:?}", q);
        }
    }

    #[test]
    fn extensions_reduce_mod_twelve() {
        // C13: extensions 14/17/21 land on D, F, A.
        assert_eq!(
            notes_of("C", ChordQuality::Thirteen).unwrap(),
            vec!["C", "E", "G", "A#", "D", "F", "A"]
        );
    }

    #[test]
    fn notes_of_bad_root_is_none() {
        assert_eq!(notes_of("X", ChordQuality::Major), None);
    }
}
