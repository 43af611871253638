//! duel_tui - Interactive TUI for playing turn-based duels

mod app;
mod battle;
mod ui;

use app::App;
use battle::SharedTui;
use clap::Parser;
use crossterm::{
    event::{self, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use duel_core::config::{default_game_constants, load_game_constants};
use duel_core::GameConstants;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "duel_tui", about = "Play turn-based text duels in the terminal")]
struct Args {
    /// Game constants TOML (defaults to the bundled config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every random roll (entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs while the terminal is in use
    #[arg(long, default_value = "duel_tui.log")]
    log_file: PathBuf,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_file)?;

    let constants = match load_constants(args.config.as_deref()) {
        Ok(constants) => constants,
        Err(err) => {
            eprintln!("duel_tui: {err}");
            process::exit(2);
        }
    };

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting duel_tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal: SharedTui = Rc::new(RefCell::new(Terminal::new(backend)?));

    let result = run(&terminal, constants, &mut rng);

    battle::restore_terminal(&mut terminal.borrow_mut())?;
    result
}

/// Menu loop; each finished setup is played out and then reported
fn run(terminal: &SharedTui, constants: GameConstants, rng: &mut ChaCha8Rng) -> io::Result<()> {
    let mut app = App::new(constants);

    loop {
        terminal.borrow_mut().draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (code, _) => app.on_key(code),
                }
            }
        }

        if app.should_quit {
            break;
        }

        if let Some(setup) = app.take_setup() {
            match battle::play(terminal, setup, app.constants(), rng)? {
                Some(report) => app.show_report(report),
                None => break,
            }
        }
    }

    Ok(())
}

/// Load constants for interactive play; turn limits are a headless-only rule
fn load_constants(path: Option<&Path>) -> Result<GameConstants, duel_core::ConfigError> {
    let mut constants = match path {
        Some(path) => load_game_constants(path)?,
        None => default_game_constants(),
    };
    constants.rules.max_turns = 0;
    Ok(constants)
}

/// Log to a file so the alternate screen stays clean
fn setup_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
