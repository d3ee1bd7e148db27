pub mod command;
pub mod genres;

use rand::Rng;
use thiserror::Error;

use crate::catalog::BackingTrack;
use crate::theory::{Spelling, root_index, transpose};
use self::genres::{normalize_genre, same_synonym_group};

/// Dimension weights. They sum to 100, so a perfect match scores 100.
pub const KEY_WEIGHT: f64 = 40.0;
pub const GENRE_WEIGHT: f64 = 30.0;
pub const BPM_WEIGHT: f64 = 20.0;
pub const SCALE_WEIGHT: f64 = 10.0;

pub const DEFAULT_BPM_TOLERANCE: f64 = 20.0;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("No backing tracks available")]
    NoTracks,
}

/// What the listener asked for. Any subset of fields may be present; an
/// absent criterion contributes zero to every track's score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub key: Option<String>,
    pub genre: Option<String>,
    pub bpm: Option<f64>,
    pub scale: Option<String>,
    pub bpm_tolerance: f64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            key: None,
            genre: None,
            bpm: None,
            scale: None,
            bpm_tolerance: DEFAULT_BPM_TOLERANCE,
        }
    }
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.genre.is_none() && self.bpm.is_none() && self.scale.is_none()
    }
}

/// A track with its computed match score and the reasons behind it.
#[derive(Debug, Clone)]
pub struct ScoredTrack {
    pub track: BackingTrack,
    /// 0 to 100; derived per search, never persisted.
    pub score: f64,
    pub reasons: Vec<String>,
}

/// The chosen track plus a human-readable explanation.
#[derive(Debug, Clone)]
pub struct BestMatch {
    pub track: BackingTrack,
    pub score: f64,
    pub explanation: String,
    pub criteria: SearchCriteria,
}

/// Normalize a key string for comparison: "a minor" -> "Am",
/// "B flat" -> "Bb", "F\u{266F} Major" -> "F#".
pub fn normalize_key(raw: &str) -> String {
    let mut s = raw.trim().to_lowercase();
    for (from, to) in [
        ("\u{266D}", "b"),
        ("\u{266F}", "#"),
        ("major", ""),
        ("minor", "m"),
        ("flat", "b"),
        ("sharp", "#"),
    ] {
        s = s.replace(from, to);
    }
    s.retain(|c| !c.is_whitespace());
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// The relative major of a minor key (root+3) or relative minor of a major
/// key (root+9), spelled from the flat table. Input must be normalized.
pub fn relative_key(key: &str) -> Option<String> {
    match key.strip_suffix('m') {
        Some(minor_root) => {
            let pc = root_index(minor_root)?;
            Some(Spelling::Flat.name(transpose(pc, 3)).to_string())
        }
        None => {
            let pc = root_index(key)?;
            Some(format!("{}m", Spelling::Flat.name(transpose(pc, 9))))
        }
    }
}

/// Key affinity in [0,1]: exact 1.0, relative major/minor 0.8, same leading
/// root letter 0.5. Symmetric by construction.
pub fn score_key_match(a: &str, b: &str) -> f64 {
    let a = normalize_key(a);
    let b = normalize_key(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if relative_key(&a).as_deref() == Some(b.as_str())
        || relative_key(&b).as_deref() == Some(a.as_str())
    {
        return 0.8;
    }
    if a.chars().next() == b.chars().next() {
        return 0.5;
    }
    0.0
}

/// Genre affinity in [0,1]: exact 1.0, same synonym group 0.7, substring in
/// either direction 0.6. The substring rule is loose for short names
/// ("pop" matches "poptart"); known quirk, see the tests.
pub fn score_genre_match(a: &str, b: &str) -> f64 {
    let a = normalize_genre(a);
    let b = normalize_genre(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if same_synonym_group(&a, &b) {
        return 0.7;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.6;
    }
    0.0
}

/// Tempo affinity in [0,1]: 1.0 at zero difference, linear decay to 0 at
/// twice the tolerance.
pub fn score_bpm(target: f64, actual: f64, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return if target == actual { 1.0 } else { 0.0 };
    }
    (1.0 - (target - actual).abs() / (2.0 * tolerance)).max(0.0)
}

/// Scale affinity: 1.0 when the request matches any recommended scale by
/// substring in either direction, case-insensitive.
fn score_scale(requested: &str, scales: &[String]) -> f64 {
    let req = requested.trim().to_lowercase();
    if req.is_empty() {
        return 0.0;
    }
    for s in scales {
        let have = s.to_lowercase();
        if have.contains(&req) || req.contains(&have) {
            return 1.0;
        }
    }
    0.0
}

/// Score one track against the criteria. Returns the weighted score in
/// [0,100] and the per-dimension match reasons.
pub fn score_track(criteria: &SearchCriteria, track: &BackingTrack) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if let (Some(want), Some(have)) = (criteria.key.as_deref(), track.meta.key.as_deref()) {
        let s = score_key_match(want, have);
        score += s * KEY_WEIGHT;
        if s >= 1.0 {
            reasons.push(format!("in {}", normalize_key(have)));
        } else if s >= 0.8 {
            reasons.push(format!(
                "{} is the relative key of {}",
                normalize_key(have),
                normalize_key(want)
            ));
        } else if s >= 0.5 {
            reasons.push(format!("shares a root with {}", normalize_key(want)));
        }
    }

    if let (Some(want), Some(have)) = (criteria.genre.as_deref(), track.meta.genre.as_deref()) {
        let s = score_genre_match(want, have);
        score += s * GENRE_WEIGHT;
        if s >= 1.0 {
            reasons.push(format!("{} genre", normalize_genre(have)));
        } else if s >= 0.7 {
            reasons.push(format!("close to {}", normalize_genre(want)));
        }
    }

    if let (Some(want), Some(have)) = (criteria.bpm, track.meta.bpm) {
        let s = score_bpm(want, have, criteria.bpm_tolerance);
        score += s * BPM_WEIGHT;
        if s > 0.7 {
            reasons.push(format!("around {have:.0} BPM"));
        }
    }

    if let (Some(want), Some(scales)) = (criteria.scale.as_deref(), track.meta.scales.as_deref()) {
        let s = score_scale(want, scales);
        score += s * SCALE_WEIGHT;
        if s > 0.0 {
            reasons.push(format!("suits the {want}"));
        }
    }

    (score, reasons)
}

/// Score and rank a catalog snapshot, highest first. The sort is stable, so
/// equal scores keep catalog order.
pub fn search(criteria: &SearchCriteria, snapshot: &[BackingTrack]) -> Vec<ScoredTrack> {
    let mut scored: Vec<ScoredTrack> = snapshot
        .iter()
        .map(|track| {
            let (score, reasons) = score_track(criteria, track);
            ScoredTrack {
                track: track.clone(),
                score,
                reasons,
            }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

/// Parse a free-text request, rank the snapshot, and pick the best track.
///
/// An empty catalog is the distinct `NoTracks` outcome. When nothing scores
/// above zero and more than one track exists, the pick is uniform over all
/// tracks through the injected RNG, so repeated vague requests don't always
/// land on the same file.
pub fn find_best<R: Rng + ?Sized>(
    text: &str,
    snapshot: &[BackingTrack],
    rng: &mut R,
) -> Result<BestMatch, MatchError> {
    if snapshot.is_empty() {
        return Err(MatchError::NoTracks);
    }

    let criteria = command::parse_command(text);
    let ranked = search(&criteria, snapshot);

    let chosen = if ranked[0].score <= 0.0 && ranked.len() > 1 {
        // All scores are zero here, so ranked order is catalog order.
        &ranked[rng.gen_range(0..ranked.len())]
    } else {
        &ranked[0]
    };

    let explanation = build_explanation(chosen);
    Ok(BestMatch {
        track: chosen.track.clone(),
        score: chosen.score,
        explanation,
        criteria,
    })
}

fn build_explanation(chosen: &ScoredTrack) -> String {
    let mut out = if chosen.score <= 0.0 {
        format!("No exact match found, playing {}", chosen.track.filename)
    } else if chosen.reasons.is_empty() {
        format!("Playing {}", chosen.track.filename)
    } else {
        format!(
            "Playing {}: {}",
            chosen.track.filename,
            chosen.reasons.join(", ")
        )
    };

    if let Some(scales) = chosen.track.meta.scales.as_deref() {
        let names: Vec<&str> = scales.iter().map(|s| s.as_str()).take(2).collect();
        if !names.is_empty() {
            out.push_str(&format!(". Try soloing with {}", names.join(" or ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TrackMeta;
    use rand::rngs::mock::StepRng;

    fn track(filename: &str, key: Option<&str>, genre: Option<&str>, bpm: Option<f64>) -> BackingTrack {
        BackingTrack {
            filename: filename.into(),
            meta: TrackMeta {
                key: key.map(Into::into),
                genre: genre.map(Into::into),
                bpm,
                scales: None,
                added: None,
            },
        }
    }

    // === Key normalization and affinity ===

    #[test]
    fn normalize_key_forms() {
        assert_eq!(normalize_key("a minor"), "Am");
        assert_eq!(normalize_key("B flat"), "Bb");
        assert_eq!(normalize_key("f\u{266F} major"), "F#");
        assert_eq!(normalize_key("  C  "), "C");
        assert_eq!(normalize_key("e m"), "Em");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn relative_key_pairs() {
        assert_eq!(relative_key("Am").as_deref(), Some("C"));
        assert_eq!(relative_key("C").as_deref(), Some("Am"));
        assert_eq!(relative_key("Em").as_deref(), Some("G"));
        assert_eq!(relative_key("F").as_deref(), Some("Dm"));
        assert_eq!(relative_key("Xm"), None);
    }

    #[test]
    fn key_score_tiers() {
        assert_eq!(score_key_match("Am", "Am"), 1.0);
        assert_eq!(score_key_match("a minor", "Am"), 1.0);
        assert_eq!(score_key_match("C", "Am"), 0.8);
        assert_eq!(score_key_match("C", "Cm"), 0.5);
        assert_eq!(score_key_match("C", "F#"), 0.0);
    }

    #[test]
    fn relative_key_score_is_symmetric() {
        assert_eq!(score_key_match("C", "Am"), score_key_match("Am", "C"));
        assert_eq!(score_key_match("Am", "C"), 0.8);
    }

    #[test]
    fn same_letter_beats_nothing_even_across_accidentals() {
        // The 0.5 tier compares leading letters only, so C vs C#m lands it.
        assert_eq!(score_key_match("C", "C#m"), 0.5);
    }

    // === Genre affinity ===

    #[test]
    fn genre_score_tiers() {
        assert_eq!(score_genre_match("Blues", "blues"), 1.0);
        assert_eq!(score_genre_match("blues", "r&b"), 0.7);
        assert_eq!(score_genre_match("rock", "rock and roll"), 0.7);
        assert_eq!(score_genre_match("jazz", "blues"), 0.0);
    }

    #[test]
    fn genre_substring_quirk_preserved() {
        // Bidirectional substring matching is loose for short names.
        assert_eq!(score_genre_match("pop", "poptart"), 0.6);
        assert_eq!(score_genre_match("poptart", "pop"), 0.6);
    }

    // === BPM decay ===

    #[test]
    fn bpm_linear_decay() {
        assert_eq!(score_bpm(100.0, 100.0, 20.0), 1.0);
        assert_eq!(score_bpm(100.0, 120.0, 20.0), 0.5);
        assert_eq!(score_bpm(100.0, 140.0, 20.0), 0.0);
        assert_eq!(score_bpm(100.0, 180.0, 20.0), 0.0);
    }

    #[test]
    fn bpm_decay_is_monotone() {
        let mut prev = score_bpm(100.0, 100.0, 20.0);
        for delta in 1..80 {
            let next = score_bpm(100.0, 100.0 + delta as f64, 20.0);
            assert!(next <= prev, "decay reversed at delta {delta}");
            prev = next;
        }
    }

    // === Weighted scoring ===

    #[test]
    fn worked_example_relative_key_blues() {
        let criteria = SearchCriteria {
            key: Some("Am".into()),
            genre: Some("blues".into()),
            bpm: Some(90.0),
            ..SearchCriteria::default()
        };
        let t = track("t.mp3", Some("C"), Some("Blues"), Some(95.0));
        let (score, reasons) = score_track(&criteria, &t);
        // 0.8*40 + 1.0*30 + (1 - 5/40)*20 = 32 + 30 + 17.5
        assert!((score - 79.5).abs() < 1e-9);
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn empty_criteria_scores_zero() {
        let t = track("t.mp3", Some("C"), Some("blues"), Some(120.0));
        let (score, reasons) = score_track(&SearchCriteria::default(), &t);
        assert_eq!(score, 0.0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn missing_track_fields_contribute_zero() {
        let criteria = SearchCriteria {
            key: Some("C".into()),
            genre: Some("blues".into()),
            bpm: Some(120.0),
            scale: Some("pentatonic".into()),
            ..SearchCriteria::default()
        };
        let (score, _) = score_track(&criteria, &BackingTrack::new("bare.mp3"));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn score_never_exceeds_hundred() {
        let criteria = SearchCriteria {
            key: Some("C".into()),
            genre: Some("blues".into()),
            bpm: Some(120.0),
            scale: Some("blues".into()),
            ..SearchCriteria::default()
        };
        let t = BackingTrack {
            filename: "perfect.mp3".into(),
            meta: TrackMeta {
                key: Some("C".into()),
                genre: Some("blues".into()),
                bpm: Some(120.0),
                scales: Some(vec!["C blues".into()]),
                added: None,
            },
        };
        let (score, _) = score_track(&criteria, &t);
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn search_ranks_highest_first_and_is_stable() {
        let snapshot = vec![
            track("c.mp3", Some("C"), None, None),
            track("first_zero.mp3", None, None, None),
            track("second_zero.mp3", None, None, None),
        ];
        let criteria = SearchCriteria {
            key: Some("C".into()),
            ..SearchCriteria::default()
        };
        let ranked = search(&criteria, &snapshot);
        assert_eq!(ranked[0].track.filename, "c.mp3");
        // Ties keep catalog order.
        assert_eq!(ranked[1].track.filename, "first_zero.mp3");
        assert_eq!(ranked[2].track.filename, "second_zero.mp3");
    }

    // === Best-match selection ===

    #[test]
    fn empty_catalog_is_no_tracks() {
        let mut rng = StepRng::new(0, 1);
        let err = find_best("blues in a", &[], &mut rng).unwrap_err();
        assert!(matches!(err, MatchError::NoTracks));
    }

    #[test]
    fn confident_match_wins_deterministically() {
        let snapshot = vec![
            track("wrong.mp3", Some("F#"), None, None),
            track("right.mp3", Some("A"), Some("blues"), Some(92.0)),
        ];
        let mut rng = StepRng::new(0, 1);
        let best = find_best("blues in a at 90 bpm", &snapshot, &mut rng).unwrap();
        assert_eq!(best.track.filename, "right.mp3");
        assert!(best.score > 0.0);
        assert!(best.explanation.starts_with("Playing right.mp3"));
    }

    #[test]
    fn zero_score_falls_back_to_random_pick() {
        let snapshot = vec![
            track("one.mp3", None, None, None),
            track("two.mp3", None, None, None),
            track("three.mp3", None, None, None),
        ];
        let mut rng = StepRng::new(0, 1);
        let best = find_best("bagpipe drone in z", &snapshot, &mut rng).unwrap();
        assert_eq!(best.score, 0.0);
        assert!(best.explanation.starts_with("No exact match found"));
        assert!(snapshot.iter().any(|t| t.filename == best.track.filename));
    }

    #[test]
    fn zero_score_single_track_skips_rng() {
        let snapshot = vec![track("only.mp3", None, None, None)];
        let mut rng = StepRng::new(0, 1);
        let best = find_best("anything", &snapshot, &mut rng).unwrap();
        assert_eq!(best.track.filename, "only.mp3");
        assert!(best.explanation.contains("No exact match"));
    }

    #[test]
    fn explanation_appends_recommended_scales() {
        let snapshot = vec![BackingTrack {
            filename: "slow_blues_a.mp3".into(),
            meta: TrackMeta {
                key: Some("A".into()),
                genre: Some("blues".into()),
                bpm: Some(60.0),
                scales: Some(vec![
                    "A minor pentatonic".into(),
                    "A blues".into(),
                    "A mixolydian".into(),
                ]),
                added: None,
            },
        }];
        let mut rng = StepRng::new(0, 1);
        let best = find_best("slow blues in a", &snapshot, &mut rng).unwrap();
        assert!(best.explanation.contains("A minor pentatonic or A blues"));
        // Only the first two recommendations are spoken.
        assert!(!best.explanation.contains("mixolydian"));
    }
}
