pub mod chords;
pub mod diatonic;
pub mod progressions;
pub mod scales;

/// A pitch class: one of the 12 equal-tempered note identities, C=0 through B=11.
pub type PitchClass = usize;

/// Chromatic note names, sharp-preferred spelling.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic note names, flat-preferred spelling.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Which spelling table to render a pitch class with.
/// A pitch class has no inherent spelling; the caller picks per context
/// (chord notes use sharps, progression roots use flats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    pub fn names(self) -> &'static [&'static str; 12] {
        match self {
            Spelling::Sharp => &SHARP_NAMES,
            Spelling::Flat => &FLAT_NAMES,
        }
    }

    pub fn name(self, pc: PitchClass) -> &'static str {
        self.names()[pc % 12]
    }
}

/// Resolve a root note name ("A", "f#", " Bb ") to its pitch class.
/// Looks up both spelling tables case-insensitively. Returns `None` for
/// anything that is not a note name.
pub fn root_index(text: &str) -> Option<PitchClass> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    SHARP_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(t))
        .or_else(|| FLAT_NAMES.iter().position(|n| n.eq_ignore_ascii_case(t)))
}

/// Transpose a pitch class by a signed number of semitones, reduced into [0,11].
pub fn transpose(pc: PitchClass, semitones: i32) -> PitchClass {
    (pc as i32 + semitones).rem_euclid(12) as usize
}
