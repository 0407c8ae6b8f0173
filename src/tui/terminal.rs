//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::storage::Store;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits
pub fn run_tui(store: &dyn Store, audit: &AuditLogger, settings: &Settings) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(store, audit, settings);
    app.refresh();
    tracing::info!(backend = store.backend_name(), "dashboard started");

    let result = event_loop(&mut terminal, &mut app);

    // Leave the alternate screen even when the loop failed
    restore_terminal()?;
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;
        handle_event(app, events.next()?)?;
    }
    Ok(())
}
