//! Transaction history view
//!
//! Search line above a table of the filtered transactions, newest first,
//! each with the running balance the store computed.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::transaction::truncate;
use crate::models::CategoryFilter;
use crate::tui::app::{App, InputMode};

/// Render the history panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_search(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Search;

    let mut spans = vec![Span::styled(
        " Search: ",
        Style::default().fg(if searching { Color::Cyan } else { Color::DarkGray }),
    )];
    spans.extend(app.search_input.spans(searching));
    spans.push(Span::raw("   "));
    spans.push(Span::styled("Filter: ", Style::default().fg(Color::DarkGray)));

    let filter_style = if app.filter.category == CategoryFilter::All {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    spans.push(Span::styled(app.filter.category.to_string(), filter_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible_transactions();

    let block = Block::default()
        .title(format!(
            " Riwayat ({}/{}) ",
            rows.len(),
            app.snapshot.transactions.len()
        ))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if rows.is_empty() {
        let message = if app.snapshot.transactions.is_empty() {
            "No transactions. Press 'a' to add one."
        } else {
            "No transactions match the search."
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(13), // ID
        Constraint::Length(16), // Date
        Constraint::Length(15), // Category
        Constraint::Min(12),    // Note
        Constraint::Length(4),  // Qty
        Constraint::Length(14), // Total
        Constraint::Length(15), // Balance
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("ID").style(bold),
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Note").style(bold),
        Cell::from("Qty").style(bold),
        Cell::from("Total").style(bold),
        Cell::from("Balance").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let txn = &row.transaction;
            let (sign, amount_color) = if txn.is_income() {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            let balance_color = if row.running_balance.is_negative() {
                Color::Red
            } else {
                Color::White
            };
            let created = txn
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();

            Row::new(vec![
                Cell::from(txn.id.to_string()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(created),
                Cell::from(txn.category().map(|c| c.as_str()).unwrap_or("-")),
                Cell::from(truncate(txn.note(), 30)),
                Cell::from(txn.quantity.to_string()),
                Cell::from(format!("{}{}", sign, txn.total))
                    .style(Style::default().fg(amount_color)),
                Cell::from(row.running_balance.to_string())
                    .style(Style::default().fg(balance_color)),
            ])
        })
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
