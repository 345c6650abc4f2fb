//! Terminal runner (default binary).
//!
//! Reads configuration from the command line and environment, then runs the
//! frame loop: poll input until the next tick, update the program, render.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bagtris::core::{ConfigError, GameConfig, Program};
use bagtris::input::{map_mouse, InputHandler};
use bagtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use bagtris::types::{Command, LOCK_DELAY_MS, SOFT_DROP_DELAY_MS, TICK_MS};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "bagtris",
    version,
    about = "Falling-block puzzle in the terminal with SRS rotation, 7-bag pieces and guideline scoring.",
    long_about = "Bagtris is a terminal falling-block puzzle.\n\n\
        CONTROLS:\n  Left/Right, h/l, a/d  Move        Up, x, k, w   Rotate right\n  z, y                  Rotate left Down, j, s    Soft drop\n  Space                 Hard drop   c, Shift      Hold\n  p, Esc                Pause       r, Enter      Restart\n  +/-                   Board size  q, Ctrl-C     Menu / quit\n\n\
        The menu is also mouse driven."
)]
pub struct Args {
    /// Starting level (1-15); can be changed again in the menu.
    #[arg(short, long, env = "BAGTRIS_LEVEL", default_value_t = 1, value_name = "N")]
    pub level: u32,

    /// Seed for the piece sequence. Random when omitted.
    #[arg(long, env = "BAGTRIS_SEED", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Gravity delay while soft dropping.
    #[arg(long, env = "BAGTRIS_SOFT_DROP_MS", default_value_t = SOFT_DROP_DELAY_MS, value_name = "MS")]
    pub soft_drop_ms: u32,

    /// How long a grounded piece may rest before it locks.
    #[arg(long, env = "BAGTRIS_LOCK_DELAY_MS", default_value_t = LOCK_DELAY_MS, value_name = "MS")]
    pub lock_delay_ms: u32,

    /// Write logs to this file (the terminal is taken by the game).
    #[arg(long, env = "BAGTRIS_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Frame interval.
    #[arg(long, env = "BAGTRIS_TICK_MS", default_value_t = TICK_MS, value_name = "MS", value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub tick_ms: u32,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig, ConfigError> {
        GameConfig {
            starting_level: self.level,
            seed: self.seed,
            soft_drop_delay: Duration::from_millis(self.soft_drop_ms as u64),
            lock_delay: Duration::from_millis(self.lock_delay_ms as u64),
        }
        .validate()
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.game_config()?;
    init_logging(args.log_file.as_deref())?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, Duration::from_millis(args.tick_ms as u64));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, tick: Duration) -> Result<()> {
    let mut program = Program::new(config);
    let mut view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut commands: Vec<Command> = Vec::with_capacity(32);
    let mut last_frame = Instant::now();

    loop {
        // Input with timeout until next tick.
        let deadline = last_frame + tick;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => commands.extend(input.handle_key_event(key)),
                Event::Mouse(mouse) => commands.extend(map_mouse(mouse)),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(last_frame);
        last_frame = now;
        commands.extend(input.update(elapsed));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let outcome = program.update(elapsed, &commands, viewport.rect());
        commands.clear();

        if outcome.quit {
            info!(high_score = program.high_score(), "quitting");
            return Ok(());
        }
        if outcome.window_scale != 0 {
            view.scale(outcome.window_scale);
        }

        let snap = program.snapshot();
        view.render_into(snap.as_ref(), program.ui().widgets(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
