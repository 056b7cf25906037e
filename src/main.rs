use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info};
use wrap_snake::config::{
    default_log_path, load_default_settings, load_settings, GameConfig, Settings, THEME_DEFAULT,
};
use wrap_snake::controller::GameController;
use wrap_snake::error::AppError;
use wrap_snake::input::{GameInput, InputHandler};
use wrap_snake::logging::{self, LogSetup};
use wrap_snake::renderer::{self, BoardRenderer};
use wrap_snake::scheduler::IntervalTimer;
use wrap_snake::terminal_runtime::{restore_terminal, TerminalSession};
use wrap_snake::ui::chrome::Chrome;

/// Upper bound on how long one frame waits for a key press.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per row and column.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Pixels per cell side; two pixel rows share one terminal row.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file. Defaults to the platform data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            tick_interval_ms: self.tick_ms,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "exiting with error");
            eprintln!("wrap-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), AppError> {
    let (config, log_setup) = prepare(&cli, default_log_path())?;

    if let LogSetup::Unavailable { path, error } = &log_setup {
        eprintln!(
            "wrap-snake: logging disabled, {} is not usable: {error}",
            path.display()
        );
    }
    info!(?config, "configuration resolved");

    install_panic_hook();
    run(&config)
}

/// Resolves configuration and sets up logging before the terminal is taken over.
fn prepare(cli: &Cli, default_log: Option<PathBuf>) -> Result<(GameConfig, LogSetup), AppError> {
    let config = resolve_config(cli)?;
    let log_setup = logging::setup(cli.log_file.as_deref(), default_log)?;

    Ok((config, log_setup))
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, AppError> {
    let file_settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => load_default_settings()?,
    };

    Ok(file_settings.merged_with(cli.overrides()).resolve()?)
}

fn run(config: &GameConfig) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut chrome = Chrome::new();
    let mut controller =
        GameController::new(config, BoardRenderer::new(THEME_DEFAULT), IntervalTimer::new());

    loop {
        session.draw(|frame| {
            let board = controller.renderer();
            renderer::render(
                frame,
                board.pixels(),
                controller.state(),
                &chrome,
                board.theme(),
            );
        })?;

        let timeout = poll_timeout(controller.time_until_tick(Instant::now()));
        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }

            controller.apply_input(game_input);
        }

        controller.pump(Instant::now());

        for event in controller.drain_events() {
            chrome.apply(event);
        }
    }

    info!(score = controller.state().score, "quit");
    Ok(())
}

/// Waits no longer than one frame, and no longer than the next tick.
fn poll_timeout(until_tick: Option<Duration>) -> Duration {
    until_tick.map_or(FRAME_POLL_INTERVAL, |until| until.min(FRAME_POLL_INTERVAL))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
