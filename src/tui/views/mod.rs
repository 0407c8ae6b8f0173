//! TUI Views module
//!
//! The dashboard is a single screen: balance cards, expense chart,
//! history table and status bar, with dialogs drawn on top.

pub mod balances;
pub mod chart;
pub mod history;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::DashboardLayout;
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = DashboardLayout::new(frame.area());

    balances::render(frame, app, &layout);
    chart::render(frame, app, layout.chart);
    history::render(frame, app, layout.history);
    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        frame.render_widget(NotificationWidget::new(notification), notification_area(frame.area()));
    }

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Top-right corner above the chart
fn notification_area(area: Rect) -> Rect {
    let width = 48.min(area.width);
    Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        4.min(area.height.saturating_sub(1)),
    )
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddTransaction => dialogs::transaction::render(frame, app),
        ActiveDialog::EditTransaction(_) => dialogs::edit::render(frame, app),
        ActiveDialog::Transfer => dialogs::transfer::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => dialogs::confirm::render(frame, app, id),
        ActiveDialog::None => {}
    }
}
