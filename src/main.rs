mod app;
mod config;
mod error;
mod event;
mod games;
mod input;
mod sim;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, Tab};
use config::Config;
use event::{Event, EventHandler};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    StarCatcher,
    SharpShooter,
}

/// Star Catcher and Sharp Shooter in the terminal.
#[derive(Debug, Parser)]
#[command(name = "starshot", version, about)]
struct Cli {
    /// TOML file overriding the built-in tuning
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs here; nothing is logged without it
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Seed both games' RNG for a repeatable session
    #[arg(long)]
    seed: Option<u64>,

    /// Open straight into a game
    #[arg(long, value_enum)]
    game: Option<GameArg>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, config = ?cli.config, "starting");

    let mut app = App::new(Arc::new(config), seed);
    if let Some(game) = cli.game {
        app = app.with_tab(match game {
            GameArg::StarCatcher => Tab::StarCatcher,
            GameArg::SharpShooter => Tab::SharpShooter,
        });
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))?;
    }
    info!(key_release = enhanced, "terminal ready");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;
    info!("bye");
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let event_handler = EventHandler::new(16); // ~60 FPS

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
