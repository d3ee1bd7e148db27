use super::diatonic::resolve_progression_in_key;

/// How much harmonic vocabulary a template assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

impl Complexity {
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Basic => "basic",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
        }
    }
}

/// A named, key-independent progression template.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionTemplate {
    pub name: &'static str,
    pub numerals: &'static [&'static str],
    pub description: &'static str,
    pub style: &'static str,
    pub complexity: Complexity,
}

/// The progression catalog. Read-only domain data.
pub const PROGRESSIONS: [ProgressionTemplate; 18] = [
    // --- pop ---
    ProgressionTemplate {
        name: "Axis of Awesome",
        numerals: &["I", "V", "vi", "IV"],
        description: "The four-chord loop behind hundreds of pop hits.",
        style: "pop",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "50s Doo-Wop",
        numerals: &["I", "vi", "IV", "V"],
        description: "The Stand By Me turnaround. Works at any tempo.",
        style: "pop",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Sensitive Rotation",
        numerals: &["vi", "IV", "I", "V"],
        description: "The four-chord loop started from the relative minor.",
        style: "pop",
        complexity: Complexity::Intermediate,
    },
    ProgressionTemplate {
        name: "Royal Road",
        numerals: &["IV", "V", "iii", "vi"],
        description: "The J-pop staple that keeps the tonic waiting.",
        style: "pop",
        complexity: Complexity::Advanced,
    },
    // --- rock ---
    ProgressionTemplate {
        name: "Mixolydian Rock",
        numerals: &["I", "bVII", "IV", "I"],
        description: "The borrowed bVII gives it classic-rock swagger.",
        style: "rock",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Minor Rock Vamp",
        numerals: &["i", "bVII", "bVI", "bVII"],
        description: "Brooding minor riff rock, straight out of the 70s.",
        style: "rock",
        complexity: Complexity::Intermediate,
    },
    ProgressionTemplate {
        name: "Andalusian Cadence",
        numerals: &["i", "bVII", "bVI", "V"],
        description: "Flamenco-flavored descent landing on the major dominant.",
        style: "rock",
        complexity: Complexity::Advanced,
    },
    // --- blues ---
    ProgressionTemplate {
        name: "12-Bar Blues",
        numerals: &["I", "I", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"],
        description: "The standard 12-bar form, one chord per bar.",
        style: "blues",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Quick-Change Blues",
        numerals: &["I", "IV", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"],
        description: "12-bar with the IV pulled forward to bar two.",
        style: "blues",
        complexity: Complexity::Intermediate,
    },
    ProgressionTemplate {
        name: "Minor Blues",
        numerals: &["i", "i", "i", "i", "iv", "iv", "i", "i", "v", "iv", "i", "v"],
        description: "The 12-bar form with every chord turned minor.",
        style: "blues",
        complexity: Complexity::Advanced,
    },
    // --- jazz ---
    ProgressionTemplate {
        name: "Major ii-V-I",
        numerals: &["ii", "V", "I"],
        description: "The fundamental jazz cadence. Practice it in every key.",
        style: "jazz",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Rhythm Changes A",
        numerals: &["I", "vi", "ii", "V"],
        description: "The A-section turnaround from I Got Rhythm.",
        style: "jazz",
        complexity: Complexity::Intermediate,
    },
    ProgressionTemplate {
        name: "Long Turnaround",
        numerals: &["iii", "vi", "ii", "V"],
        description: "The turnaround stretched back to the iii chord.",
        style: "jazz",
        complexity: Complexity::Advanced,
    },
    ProgressionTemplate {
        name: "Backdoor Resolution",
        numerals: &["IV", "bVII", "I"],
        description: "Sneaks home through the backdoor dominant.",
        style: "jazz",
        complexity: Complexity::Advanced,
    },
    // --- folk ---
    ProgressionTemplate {
        name: "Campfire Standard",
        numerals: &["I", "IV", "I", "V"],
        description: "Three chords and the truth.",
        style: "folk",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Modal Folk",
        numerals: &["I", "bVII", "I", "IV"],
        description: "Drone-friendly mixolydian color for fingerpicking.",
        style: "folk",
        complexity: Complexity::Intermediate,
    },
    // --- funk ---
    ProgressionTemplate {
        name: "Minor Funk Vamp",
        numerals: &["i", "iv"],
        description: "Two-chord minor vamp. The groove does the rest.",
        style: "funk",
        complexity: Complexity::Basic,
    },
    ProgressionTemplate {
        name: "Dorian Funk",
        numerals: &["i", "IV"],
        description: "Minor one to major four, the dorian funk signature.",
        style: "funk",
        complexity: Complexity::Intermediate,
    },
];

/// A template resolved into concrete chords for a key.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProgression {
    pub name: &'static str,
    pub chords: Vec<String>,
    pub description: &'static str,
    pub style: &'static str,
    pub complexity: Complexity,
}

/// Whether a template's complexity is acceptable as a fallback for the
/// requested tier: basic stays basic, intermediate accepts non-advanced,
/// advanced accepts anything.
fn complexity_compatible(requested: Complexity, candidate: Complexity) -> bool {
    match requested {
        Complexity::Basic => candidate == Complexity::Basic,
        Complexity::Intermediate => candidate != Complexity::Advanced,
        Complexity::Advanced => true,
    }
}

/// Select and resolve progressions for a style.
///
/// Cascade: exact (style, complexity) match; then same style at a compatible
/// complexity; then the whole style's catalog. Never empty when the style
/// exists in the catalog at all. Returns an empty list for unknown styles
/// and `None` only when the key root is unresolvable.
pub fn progressions_for_style(
    style: &str,
    complexity: Complexity,
    key_root: &str,
    use_sevenths: bool,
) -> Option<Vec<ResolvedProgression>> {
    // Fail fast on a bad key before selecting anything.
    super::root_index(key_root)?;

    let by_style: Vec<&ProgressionTemplate> = PROGRESSIONS
        .iter()
        .filter(|p| p.style.eq_ignore_ascii_case(style.trim()))
        .collect();

    let mut selected: Vec<&ProgressionTemplate> = by_style
        .iter()
        .copied()
        .filter(|p| p.complexity == complexity)
        .collect();
    if selected.is_empty() {
        selected = by_style
            .iter()
            .copied()
            .filter(|p| complexity_compatible(complexity, p.complexity))
            .collect();
    }
    if selected.is_empty() {
        selected = by_style;
    }

    Some(
        selected
            .iter()
            .map(|p| ResolvedProgression {
                name: p.name,
                chords: resolve_progression_in_key(key_root, p.numerals, use_sevenths)
                    .unwrap_or_default(),
                description: p.description,
                style: p.style,
                complexity: p.complexity,
            })
            .collect(),
    )
}

/// Distinct styles present in the catalog, in catalog order.
pub fn available_styles() -> Vec<&'static str> {
    let mut styles = Vec::new();
    for p in &PROGRESSIONS {
        if !styles.contains(&p.style) {
            styles.push(p.style);
        }
    }
    styles
}
