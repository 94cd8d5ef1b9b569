use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::EngineConfig;
use grid_snake::engine::TickEngine;
use grid_snake::input::GameInput;
use grid_snake::renderer::View;
use grid_snake::terminal_runtime::{self, Screen};
use grid_snake::BoundaryPolicy;
use log::LevelFilter;
use simplelog::WriteLogger;

/// Input poll granularity while paused or waiting for a tick.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON engine config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Re-enter from the opposite edge instead of dying on the wall.
    #[arg(long)]
    wrap: bool,

    /// Initial snake length.
    #[arg(long)]
    length: Option<usize>,

    /// Initial tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is in raw mode while playing).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn engine_config(&self) -> io::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path).map_err(io::Error::other)?,
            None => EngineConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.wrap {
            config.boundary = BoundaryPolicy::Wrap;
        }
        if let Some(length) = self.length {
            config.initial_length = length;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.initial_tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(cli.log_level, simplelog::Config::default(), File::create(path)?)
            .map_err(io::Error::other)?;
    }

    // Fail before touching the terminal so errors print normally.
    let config = cli.engine_config()?;
    let engine = TickEngine::new(config).map_err(io::Error::other)?;

    install_panic_hook();

    let mut screen = Screen::open()?;
    let result = run(&mut screen, engine);
    drop(screen);

    if let Err(error) = &result {
        log::error!("terminal loop failed: {error}");
    }
    result
}

fn run(screen: &mut Screen, mut engine: TickEngine) -> io::Result<()> {
    let cell_columns = View::cell_columns_for(engine.config().cell_size);
    let mut snapshot = engine.snapshot();
    let mut paused = false;
    let mut next_tick = Instant::now() + engine.tick_interval();

    loop {
        let view = View {
            bounds: engine.bounds(),
            cell_columns,
            paused,
            collision: engine.collision(),
        };
        screen.show(&snapshot, view)?;

        let timeout = if paused || snapshot.status.is_terminal() {
            FRAME_BUDGET
        } else {
            next_tick.saturating_duration_since(Instant::now())
        };

        if let Some(input) = terminal_runtime::next_input(timeout)? {
            match input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => {
                    if !paused {
                        engine.set_intended_direction(direction);
                    }
                }
                GameInput::Pause if !snapshot.status.is_terminal() => {
                    paused = !paused;
                    next_tick = Instant::now() + engine.tick_interval();
                }
                GameInput::Restart if snapshot.status.is_terminal() => {
                    engine.reset().map_err(io::Error::other)?;
                    snapshot = engine.snapshot();
                    paused = false;
                    next_tick = Instant::now() + engine.tick_interval();
                    log::info!("new game started");
                }
                GameInput::Pause | GameInput::Restart => {}
            }
        }

        if !paused && !snapshot.status.is_terminal() && Instant::now() >= next_tick {
            snapshot = engine.step();
            next_tick += engine.tick_interval();
            // Do not try to catch up after a long stall.
            let now = Instant::now();
            if next_tick < now {
                next_tick = now;
            }
        }
    }

    log::info!("quit with score {}", snapshot.score);
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal_runtime::restore_terminal();
        default_hook(panic_info);
    }));
}
