//! Chordbeat — terminal chord trainer.
//!
//! Loads ~/.chordbeat/settings.yaml, applies command-line overrides, and runs
//! the TUI. Logs go to ~/.chordbeat/chordbeat.log so they never paint over
//! the terminal UI; set `CHORDBEAT_LOG=debug` for more detail.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chordbeat::chord::{DegreeSource, MatchPolicy, RandomDegrees};
use chordbeat::midi::MidiInput;
use chordbeat::settings::{self, Settings};
use chordbeat::theory::{Key, Scale};
use chordbeat::tui::App;

#[derive(Debug, Parser)]
#[command(name = "chordbeat", version, about)]
struct Cli {
    /// Settings file (default: ~/.chordbeat/settings.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metronome tempo in beats per minute
    #[arg(long)]
    bpm: Option<f64>,

    /// Tonic, as a note name (C, F#, Bb) or semitone 0-11
    #[arg(long)]
    key: Option<Key>,

    /// major or minor
    #[arg(long)]
    scale: Option<Scale>,

    /// Octave of generated chord roots (4 puts C at MIDI 60)
    #[arg(long)]
    octave: Option<i32>,

    /// Seed for a reproducible chord sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Accept a chord even when extra notes are held
    #[arg(long)]
    allow_extra_notes: bool,

    /// Print available MIDI input ports and exit
    #[arg(long)]
    list_midi: bool,
}

impl Cli {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(bpm) = self.bpm {
            settings.bpm = bpm;
        }
        if let Some(key) = self.key {
            settings.music.key = key;
        }
        if let Some(scale) = self.scale {
            settings.music.scale = scale;
        }
        if let Some(octave) = self.octave {
            settings.music.octave = octave;
        }
        if self.allow_extra_notes {
            settings.match_policy = MatchPolicy::AllowExtra;
        }
        settings.normalized()
    }
}

fn init_logging() {
    let dir = settings::app_dir();
    let file = std::fs::create_dir_all(&dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("chordbeat.log"))
    });
    let file = match file {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            return;
        }
    };

    let filter =
        EnvFilter::try_from_env("CHORDBEAT_LOG").unwrap_or_else(|_| EnvFilter::new("chordbeat=info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_midi {
        let devices = MidiInput::list_devices();
        if devices.is_empty() {
            println!("no MIDI input ports found");
        }
        for (i, name) in devices.iter().enumerate() {
            println!("{i}: {name}");
        }
        return ExitCode::SUCCESS;
    }

    init_logging();

    let path = cli
        .config
        .clone()
        .unwrap_or_else(settings::default_settings_path);
    let loaded = match settings::load_settings(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let settings = cli.apply(loaded);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        music = %settings.music,
        bpm = settings.bpm,
        "starting chordbeat"
    );

    let degrees: Box<dyn DegreeSource + Send> = match cli.seed {
        Some(seed) => Box::new(RandomDegrees::from_seed(seed)),
        None => Box::new(RandomDegrees::from_entropy()),
    };
    let mut app = App::new(&settings, degrees);

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("error: cannot initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = app.run(&mut terminal);
    ratatui::restore();

    match result {
        Ok(()) => {
            // Key, scale, octave, tempo and matching carry over to the next run.
            let saved = app.settings_snapshot(&settings);
            if let Err(e) = settings::save_settings(&path, &saved) {
                tracing::warn!("could not save {}: {e}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("terminal error: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
