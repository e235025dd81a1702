// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod handlers;
pub mod state;
pub mod view;

use crate::cli;
use crate::config::Config;
use crate::context::StandardContext;
use crate::controller::Lict;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(override_root: Option<PathBuf>) -> Result<()> {
    // --- 1. CONFIG & CONTROLLER ---
    let ctx = StandardContext::new(override_root);
    let config = Config::load_or_init(&ctx)?;
    if let Err(e) = cli::init_logging(&ctx, config.log_level_filter()) {
        eprintln!("Warning: {}", e);
    }
    let mut state = AppState::new(Lict::from_context(&ctx, &config)?);

    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. UI LOOP ---
    let result = event_loop(&mut terminal, &mut state);

    // --- 4. CLEANUP ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("Session ended with {} tasks", state.lict.tasks().len());
    result
}

fn event_loop(terminal: &mut Term, state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        if state.should_quit {
            if state.said_bye {
                std::thread::sleep(Duration::from_millis(800));
            }
            return Ok(());
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
        {
            // Filter out KeyRelease events to prevent double input on Windows
            if key.kind == KeyEventKind::Release {
                continue;
            }
            handlers::handle_key_event(key, state);
        }
    }
}
