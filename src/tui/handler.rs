//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the
//! current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, App, InputMode};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Tick => {
            app.notifications.remove_expired();
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
    Ok(())
}

/// Handle keys on the dashboard
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Char('r') => {
            app.refresh();
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddTransaction),
        KeyCode::Char('t') => app.open_dialog(ActiveDialog::Transfer),

        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_transaction().map(|t| t.id) {
                app.open_dialog(ActiveDialog::EditTransaction(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_transaction().map(|t| t.id) {
                app.open_dialog(ActiveDialog::ConfirmDelete(id));
            }
        }

        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.move_end();
        }
        KeyCode::Char('f') => app.next_category_filter(),
        KeyCode::Char('F') => app.prev_category_filter(),
        KeyCode::Esc => {
            app.clear_filter();
            app.notifications.dismiss();
        }

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.move_down();
            }
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.move_up();
            }
        }
        _ => {}
    }
}

/// Handle keys while typing a search; the filter updates as you type
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.apply_search();
        }
        KeyCode::Backspace => {
            app.search_input.backspace();
            app.apply_search();
        }
        KeyCode::Delete => {
            app.search_input.delete();
            app.apply_search();
        }
        KeyCode::Left => app.search_input.move_left(),
        KeyCode::Right => app.search_input.move_right(),
        KeyCode::Home => app.search_input.move_start(),
        KeyCode::End => app.search_input.move_end(),
        KeyCode::Char(c) => {
            app.search_input.insert(c);
            app.apply_search();
        }
        _ => {}
    }
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::AddTransaction => {
            dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::EditTransaction(_) => {
            dialogs::edit::handle_key(app, key);
        }
        ActiveDialog::Transfer => {
            dialogs::transfer::handle_key(app, key);
        }
        ActiveDialog::ConfirmDelete(id) => {
            dialogs::confirm::handle_key(app, key, id);
        }
        ActiveDialog::None => {}
    }
}
