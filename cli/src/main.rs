use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tapsweep_core::{
    CellCount, Coord, Coord2, Difficulty, GameConfig, GameEngine, GameEvent, GameMode,
    GameResult, GestureConfig, GestureTracker, RandomMinePlacer, ScoreBoard,
};

use command::{Command, HELP};

mod command;
mod render;

#[derive(ValueEnum, Copy, Clone, Debug, Default)]
enum DifficultyArg {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default)]
enum ModeArg {
    #[default]
    Classic,
    Timed,
    Blitz,
    Survival,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::Timed => GameMode::Timed,
            ModeArg::Blitz => GameMode::Blitz,
            ModeArg::Survival => GameMode::Survival,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Terminal mine-clearing game", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(short, long, value_enum, default_value_t)]
    difficulty: DifficultyArg,

    /// Custom board rows, overrides the preset
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires = "rows")]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires = "rows")]
    mines: Option<CellCount>,

    /// Game mode, reported only
    #[arg(long, value_enum, default_value_t)]
    mode: ModeArg,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print every engine event as a JSON line
    #[arg(long)]
    events: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                GameConfig::new(rows, cols, mines).context("Invalid custom board")
            }
            _ => Ok(Difficulty::from(self.difficulty).config()),
        }
    }
}

/// Host-side game timer, the engine only ever sees the seconds it reports.
#[derive(Debug, Default)]
struct Stopwatch {
    started: Option<Instant>,
    stopped_at: Option<u32>,
}

impl Stopwatch {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn elapsed_secs(&self) -> u32 {
        match (self.stopped_at, self.started) {
            (Some(secs), _) => secs,
            (None, Some(started)) => started.elapsed().as_secs() as u32,
            (None, None) => 0,
        }
    }

    fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStart => {
                self.started = Some(Instant::now());
                self.stopped_at = None;
            }
            GameEvent::GameWin(summary) | GameEvent::GameOver(summary) => {
                self.stopped_at = Some(summary.elapsed_secs);
            }
            _ => {}
        }
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Cell center in cell units, the coordinate space the gesture tracker measures drags in.
fn cell_center((row, col): Coord2) -> (f32, f32) {
    (f32::from(col) + 0.5, f32::from(row) + 0.5)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    log::info!("New {} game", config);

    let mut engine = GameEngine::new(config, args.mode.into(), RandomMinePlacer::new(seed));
    let gesture_config = GestureConfig::default();
    let mut gestures = GestureTracker::new(gesture_config);
    let mut stopwatch = Stopwatch::default();
    let mut scores = ScoreBoard::new();

    let mut out = io::stdout().lock();
    writeln!(out, "{}", HELP)?;
    render::board(&mut out, &engine, 0)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        let elapsed_secs = stopwatch.elapsed_secs();

        let input = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Stats => {
                render::stats(&mut out, &scores.player_stats())?;
                continue;
            }
            Command::Show => None,
            Command::New => {
                engine.restart();
                None
            }
            Command::ToggleMarkingMode => {
                engine.set_marking_mode(!engine.is_marking_mode());
                None
            }
            Command::Tap(coords) => gestures
                .press(coords, cell_center(coords), engine.is_marking_mode())
                .or_else(|| gestures.release()),
            Command::Hold(coords) => gestures
                .press(coords, cell_center(coords), engine.is_marking_mode())
                .or_else(|| gestures.update(gesture_config.long_press_ms)),
            Command::Play(input) => Some(input),
        };
        gestures.cancel();

        if let Some(input) = input {
            let outcome = engine.handle(input, elapsed_secs);
            log::debug!("{:?} -> {:?}", input, outcome);
        }

        for event in engine.drain_events() {
            stopwatch.observe(&event);
            if let Some(result) = GameResult::from_event(config, &event) {
                scores.record(result);
            }
            if args.events {
                writeln!(out, "{}", serde_json::to_string(&event)?)?;
            }
        }
        if engine.state().is_initial() {
            stopwatch.reset();
        }

        render::board(&mut out, &engine, stopwatch.elapsed_secs())?;
    }

    Ok(())
}
