//! Layout definitions for the TUI
//!
//! Defines the dashboard layout: balance cards, expense chart, history
//! table and status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the dashboard
pub struct DashboardLayout {
    /// Row of summary cards
    pub cards: Rect,
    /// 14-day expense chart
    pub chart: Rect,
    /// Transaction history
    pub history: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl DashboardLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Cards
                Constraint::Length(12), // Chart
                Constraint::Min(6),     // History
                Constraint::Length(1),  // Status bar
            ])
            .split(area);

        Self {
            cards: vertical[0],
            chart: vertical[1],
            history: vertical[2],
            status_bar: vertical[3],
        }
    }

    /// Split the card row into `count` equal columns
    pub fn card_slots(&self, count: usize) -> Vec<Rect> {
        let count = count.max(1) as u32;
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
            .split(self.cards)
            .to_vec()
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_regions_fill_height() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.cards.height, 4);
        assert_eq!(layout.chart.height, 12);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.history.height, 40 - 4 - 12 - 1);
        assert_eq!(layout.status_bar.y, 39);
    }

    #[test]
    fn test_card_slots() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 120, 40));
        let slots = layout.card_slots(6);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots.iter().map(|r| r.width).sum::<u16>(), 120);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 20, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);

        let rect = centered_rect_fixed(20, 4, area);
        assert_eq!((rect.x, rect.y), (10, 3));
    }
}
