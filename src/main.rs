use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::thread_rng;
use std::path::PathBuf;
use woodshed::matching::{self, SearchCriteria, command::parse_command};
use woodshed::theory::progressions::{Complexity, available_styles, progressions_for_style};
use woodshed::theory::{chords, diatonic, scales};
use woodshed::{catalog, config};

#[derive(Parser)]
#[command(name = "woodshed", version, about = "Practice-room music assistant: chords, progressions, backing tracks")]
struct Cli {
    /// Path to the track catalog JSON file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum ComplexityArg {
    Basic,
    Intermediate,
    Advanced,
}

impl ComplexityArg {
    fn tier(&self) -> Complexity {
        match self {
            Self::Basic => Complexity::Basic,
            Self::Intermediate => Complexity::Intermediate,
            Self::Advanced => Complexity::Advanced,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a chord: notes and what it is
    Chord {
        /// Chord name (e.g. "F#m7", "Bbmaj7", "c minor")
        name: String,
    },

    /// Spell out a scale
    Scale {
        /// Root note (e.g. "A", "f#", "Bb")
        root: String,

        /// Scale name (e.g. "minor pentatonic", "dorian")
        name: Vec<String>,
    },

    /// Show the seven diatonic chords of a major key
    Diatonic {
        /// Key root (e.g. "C", "Eb")
        key: String,
    },

    /// Suggest chord progressions for a style, resolved into a key
    Progression {
        /// Key root (e.g. "G")
        key: String,

        /// Style (pop, rock, blues, jazz, folk, funk)
        style: String,

        /// How adventurous the harmony should be
        #[arg(short, long, value_enum, default_value = "basic")]
        complexity: ComplexityArg,

        /// Render seventh chords instead of triads
        #[arg(long)]
        sevenths: bool,
    },

    /// Scan directories for audio files and register them as backing tracks
    Scan {
        /// Directories to scan (defaults to config file music_dirs)
        paths: Vec<String>,
    },

    /// Set metadata on a registered backing track
    Tag {
        /// Track filename (the catalog key)
        filename: String,

        /// Key the track is in (e.g. "Am")
        #[arg(long)]
        key: Option<String>,

        /// Genre tag
        #[arg(long)]
        genre: Option<String>,

        /// Tempo in BPM
        #[arg(long)]
        bpm: Option<f64>,

        /// Recommended scale (repeatable)
        #[arg(long = "scale")]
        scales: Vec<String>,
    },

    /// List the backing-track catalog
    Tracks,

    /// Rank backing tracks against a free-text request
    Search {
        /// Free-text request (e.g. "blues in A at 90 bpm")
        request: Vec<String>,

        /// Number of results
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Pick the single best backing track for a request
    Pick {
        /// Free-text request
        request: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = config::AppConfig::load();

    // Resolve catalog path: CLI > config > XDG default
    let catalog_path = cli
        .catalog
        .or(config.catalog_path.clone())
        .unwrap_or_else(config::default_catalog_path);
    log::info!("Catalog: {}", catalog_path.display());

    match cli.command {
        Commands::Chord { name } => {
            let parsed = match chords::parse_chord_name(&name) {
                Some(p) => p,
                None => {
                    println!("Couldn't make sense of \"{}\" as a chord name.", name);
                    println!("Try something like \"Am\", \"F#m7\", or \"Bbmaj7\".");
                    return Ok(());
                }
            };
            let notes = chords::notes_of_pc(parsed.root_pc, parsed.quality);
            println!("{}  ({} {})", parsed.symbol(), parsed.root, parsed.quality.name());
            println!("Notes: {}", notes.join(" "));
            println!("{}", parsed.quality.description());
        }

        Commands::Scale { root, name } => {
            let scale_name = if name.is_empty() {
                "major".to_string()
            } else {
                name.join(" ")
            };
            match scales::scale_notes(&root, &scale_name) {
                Some(notes) => {
                    println!("{} {}: {}", canonical_note(&root), scale_name, notes.join(" "));
                }
                None => {
                    println!("Unknown root or scale: \"{} {}\".", root, scale_name);
                    println!("Scales I know: {}", scales::available_scales().join(", "));
                }
            }
        }

        Commands::Diatonic { key } => {
            let Some(chords) = diatonic::diatonic_chords(&key) else {
                println!("\"{}\" isn't a key I recognize. Try a note name like C or Eb.", key);
                return Ok(());
            };
            println!("Diatonic chords of {} major:", canonical_note(&key));
            println!();
            println!("{:<6} {:<8} {}", "Degree", "Chord", "Quality");
            println!("{}", "-".repeat(34));
            for c in &chords {
                println!("{:<6} {:<8} {}", c.numeral, c.symbol, c.quality.label());
            }
        }

        Commands::Progression { key, style, complexity, sevenths } => {
            let Some(progressions) =
                progressions_for_style(&style, complexity.tier(), &key, sevenths)
            else {
                println!("\"{}\" isn't a key I recognize. Try a note name like G or Bb.", key);
                return Ok(());
            };
            if progressions.is_empty() {
                println!("No progressions for style \"{}\".", style);
                println!("Styles I know: {}", available_styles().join(", "));
                return Ok(());
            }
            println!("{} progressions in {}:", style, canonical_note(&key));
            println!();
            for p in &progressions {
                println!("{} [{}]", p.name, p.complexity.label());
                println!("  {}", p.chords.join(" - "));
                println!("  {}", p.description);
                println!();
            }
        }

        Commands::Scan { paths } => {
            // Resolve scan paths: CLI args > config music_dirs
            let scan_paths = if !paths.is_empty() {
                paths
            } else if !config.music_dirs.is_empty() {
                config
                    .music_dirs
                    .iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect()
            } else {
                anyhow::bail!(
                    "No directories to scan. Pass paths as arguments or set music_dirs in config."
                );
            };

            let mut tracks = catalog::load(&catalog_path).context("Failed to load catalog")?;
            let result = catalog::scan_into(&mut tracks, &scan_paths);
            catalog::save(&catalog_path, &tracks).context("Failed to save catalog")?;
            println!(
                "Scan complete: {} audio files found, {} new, {} already registered",
                result.scanned, result.new, result.skipped
            );
        }

        Commands::Tag { filename, key, genre, bpm, scales } => {
            let mut tracks = catalog::load(&catalog_path).context("Failed to load catalog")?;
            let scales = if scales.is_empty() { None } else { Some(scales) };
            catalog::tag_track(&mut tracks, &filename, key, genre, bpm, scales)
                .context("Tagging failed")?;
            catalog::save(&catalog_path, &tracks).context("Failed to save catalog")?;
            println!("Updated {}", filename);
        }

        Commands::Tracks => {
            let tracks = catalog::load(&catalog_path).context("Failed to load catalog")?;
            if tracks.is_empty() {
                println!("Catalog is empty. Run `woodshed scan <dir>` to register tracks.");
                return Ok(());
            }
            print_track_table(&tracks);
        }

        Commands::Search { request, limit } => {
            let text = request.join(" ");
            let tracks = catalog::load(&catalog_path).context("Failed to load catalog")?;
            if tracks.is_empty() {
                println!("No backing tracks available.");
                return Ok(());
            }

            let criteria = parse_command(&text);
            print_criteria(&criteria);

            let ranked = matching::search(&criteria, &tracks);
            println!();
            println!("{:<30} {:>6}  {}", "Track", "Score", "Why");
            println!("{}", "-".repeat(72));
            for t in ranked.iter().take(limit) {
                let why = if t.reasons.is_empty() {
                    "-".to_string()
                } else {
                    t.reasons.join(", ")
                };
                println!("{:<30} {:>6.1}  {}", truncate(&t.track.filename, 30), t.score, why);
            }
        }

        Commands::Pick { request } => {
            let text = request.join(" ");
            let tracks = catalog::load(&catalog_path).context("Failed to load catalog")?;
            match matching::find_best(&text, &tracks, &mut thread_rng()) {
                Ok(best) => {
                    println!("{}", best.track.filename);
                    println!("{}", best.explanation);
                }
                Err(matching::MatchError::NoTracks) => {
                    println!("No backing tracks available.");
                }
            }
        }
    }

    Ok(())
}

fn print_criteria(criteria: &SearchCriteria) {
    if criteria.is_empty() {
        println!("No criteria recognized in the request; everything scores zero.");
        return;
    }
    let mut parts = Vec::new();
    if let Some(k) = &criteria.key {
        parts.push(format!("key={k}"));
    }
    if let Some(g) = &criteria.genre {
        parts.push(format!("genre={g}"));
    }
    if let Some(b) = criteria.bpm {
        parts.push(format!("bpm={b:.0}"));
    }
    if let Some(s) = &criteria.scale {
        parts.push(format!("scale={s}"));
    }
    println!("Criteria: {}", parts.join("  "));
}

fn print_track_table(tracks: &[catalog::BackingTrack]) {
    println!(
        "{:<30} {:<6} {:<12} {:>5}  {}",
        "Filename", "Key", "Genre", "BPM", "Scales"
    );
    println!("{}", "-".repeat(80));
    for t in tracks {
        let bpm = t
            .meta
            .bpm
            .map(|b| format!("{b:.0}"))
            .unwrap_or_else(|| "-".to_string());
        let scales = t
            .meta
            .scales
            .as_deref()
            .map(|s| s.join(", "))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<30} {:<6} {:<12} {:>5}  {}",
            truncate(&t.filename, 30),
            t.meta.key.as_deref().unwrap_or("-"),
            t.meta.genre.as_deref().unwrap_or("-"),
            bpm,
            scales
        );
    }
}

/// Canonical note display: "bb" -> "Bb", "f#" -> "F#".
fn canonical_note(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        format!("{}...", &s[..max.saturating_sub(3)])
    } else {
        s.to_string()
    }
}
