//! Terminal User Interface module
//!
//! A single-screen dashboard built on ratatui: balance cards, a 14-day
//! expense chart and the searchable transaction history, with modal
//! dialogs for adding, editing, deleting and transferring.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
