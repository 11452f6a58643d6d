use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{ConfigOverrides, SessionConfig, THEME_CLASSIC};
use grid_snake::error::AppError;
use grid_snake::input::GameInput;
use grid_snake::renderer;
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{TerminalSession, poll_input};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a walled square grid")]
struct Cli {
    /// JSON file with `grid_size`, `tick_interval_ms` and `render_interval_ms`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board, walls included.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_interval_ms: Option<u64>,

    /// Milliseconds between rendered frames.
    #[arg(long = "render-ms")]
    render_interval_ms: Option<u64>,

    /// Seed for reproducible food and start positions.
    #[arg(long)]
    seed: Option<u64>,

    /// Write trace logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            grid_size: self.grid_size,
            tick_interval_ms: self.tick_interval_ms,
            render_interval_ms: self.render_interval_ms,
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = resolve_config(&cli)?;
    let session = match cli.seed {
        Some(seed) => Session::new_with_seed(config, seed)?,
        None => Session::new(config)?,
    };

    run(session)
}

fn resolve_config(cli: &Cli) -> Result<SessionConfig, AppError> {
    let mut config = SessionConfig::default();
    if let Some(path) = &cli.config {
        config = config.merged(ConfigOverrides::load(path)?);
    }
    let config = config.merged(cli.overrides());
    config.validate()?;
    Ok(config)
}

fn run(mut session: Session) -> Result<(), AppError> {
    let mut terminal = TerminalSession::enter()?;
    let config = session.config();
    let board = session.board();

    let mut next_tick = Instant::now() + config.tick_interval();
    let mut next_frame = Instant::now();

    loop {
        let now = Instant::now();

        if now >= next_frame {
            if session.take_redraw() {
                let view = session.render_view()?;
                let status = session.status_message();
                terminal.terminal_mut().draw(|frame| {
                    renderer::render(frame, board, &view, status, &THEME_CLASSIC);
                })?;
            }
            next_frame = now + config.render_interval();
        }

        if now >= next_tick {
            session.tick()?;
            next_tick = now + config.tick_interval();
        }

        let timeout = next_tick
            .min(next_frame)
            .saturating_duration_since(Instant::now());
        if let Some(input) = poll_input(timeout)? {
            if input == GameInput::Quit {
                info!("quit requested");
                break;
            }
            session.press(input)?;
        }
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,grid_snake=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
