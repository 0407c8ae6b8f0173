//! 14-day expense chart
//!
//! One bar per day, earliest on the left. Today's bar is highlighted and
//! the footer shows today's total next to the window total.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::reports::{DailyExpenses, WINDOW_DAYS};
use crate::tui::app::App;

/// Render the chart panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Pengeluaran 14 Hari Terakhir ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    render_bars(frame, &app.daily, chunks[0]);
    render_footer(frame, &app.daily, chunks[1]);
}

fn render_bars(frame: &mut Frame, daily: &DailyExpenses, area: Rect) {
    let gap = 1u16;
    let bar_width = bar_width_for(area.width, gap);
    let last = daily.days().len().saturating_sub(1);

    let bars: Vec<Bar> = daily
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let style = if i == last {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Red)
            };
            Bar::default()
                .value(day.expense.rupiah().max(0) as u64)
                .label(Line::from(day.short_label.clone()))
                .text_value(day.expense.format_compact())
                .style(style)
                .value_style(Style::default().fg(Color::Black).bg(Color::Gray))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(daily.peak().rupiah().max(1) as u64);

    frame.render_widget(chart, area);
}

/// Widest bar that fits all days with `gap` columns between them
fn bar_width_for(width: u16, gap: u16) -> u16 {
    let days = WINDOW_DAYS as u16;
    let usable = width.saturating_sub(gap * (days - 1));
    (usable / days).max(1)
}

fn render_footer(frame: &mut Frame, daily: &DailyExpenses, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Hari ini: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            daily.today_total().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Total 14 hari: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            daily.total().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            daily.today().full_label.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_fits_window() {
        assert_eq!(bar_width_for(118, 1), 7);
        assert_eq!(bar_width_for(10, 1), 1);
        let width = bar_width_for(80, 1);
        assert!(width * 14 + 13 <= 80);
    }
}
