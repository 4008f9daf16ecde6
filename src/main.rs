use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, event, terminal, ExecutableCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use terminal_invaders::compute::{apply_command, new_game, tick};
use terminal_invaders::config::Settings;
use terminal_invaders::display;
use terminal_invaders::entities::Command;
use terminal_invaders::input::{next_command, offer, Offer};

#[derive(Parser, Debug)]
#[command(name = "terminal_invaders")]
#[command(about = "Defend the arena against a marching invader wave")]
struct Args {
    /// Seed for a reproducible session
    #[arg(long, env = "INVADERS_SEED")]
    seed: Option<u64>,

    /// Milliseconds slept between ticks
    #[arg(long, env = "INVADERS_TICK_MS", default_value_t = 50)]
    tick_ms: u64,

    /// Write log records to this file (the terminal belongs to the game)
    #[arg(long, env = "INVADERS_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_settings(self) -> Settings {
        Settings {
            seed: self.seed,
            log_file: self.log_file,
            ..Settings::default()
        }
        .with_tick_ms(self.tick_ms)
    }
}

fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One tick per iteration: take at most one pending event, step the
/// simulation, draw, then sleep out the rest of the tick.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<event::Event>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (width, height) = terminal::size().context("failed to read terminal size")?;
    let mut state = new_game(width, height);

    loop {
        let frame_start = Instant::now();

        if let Some(command) = next_command(rx) {
            if command == Command::Quit {
                log::info!("quit after {} ticks, score {}", state.frame, state.score);
                return Ok(());
            }
            apply_command(&mut state, command);
        }

        tick(&mut state, &mut rng).context("simulation invariant violated")?;
        display::render(out, &state).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < settings.tick {
            thread::sleep(settings.tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings = Args::parse().into_settings();
    init_logging(&settings)?;

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    // Declared before `out` so the buffer is flushed before the screen is left.
    let _guard = display::TerminalGuard::new(stdout());
    let mut out = BufWriter::new(stdout());
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread to blocking event reads.  The channel holds a single
    // pending event; anything arriving while it is full is dropped.
    let (tx, rx) = mpsc::sync_channel::<event::Event>(1);
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if offer(&tx, ev) == Offer::Closed {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &settings);

    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}
