//! Text input widget
//!
//! A single-line text field with a character-indexed cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A single-line text input
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder shown while empty and unfocused
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content and move the cursor to the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.content.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Spans for the value, with a block cursor when focused
    pub fn spans(&self, focused: bool) -> Vec<Span<'static>> {
        let value_style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };

        if !focused {
            let (text, style) = if self.content.is_empty() {
                (self.placeholder.clone(), Style::default().fg(Color::DarkGray))
            } else {
                (self.content.clone(), value_style)
            };
            return vec![Span::styled(text, style)];
        }

        let before: String = self.content.chars().take(self.cursor).collect();
        let mut rest = self.content.chars().skip(self.cursor);
        let under = rest.next().unwrap_or(' ');
        let after: String = rest.collect();

        vec![
            Span::styled(before, value_style),
            Span::styled(
                under.to_string(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(after, value_style),
        ]
    }
}

/// Render a right-aligned label followed by the input
pub fn render_field(frame: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool) {
    let mut spans = vec![label_span(label, focused)];
    spans.extend(input.spans(focused));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a label with a value picked by ←/→
pub fn render_choice(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut spans = vec![label_span(label, focused)];
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(value.to_string(), value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
    } else {
        spans.push(Span::styled(value.to_string(), value_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("{:>10}: ", label), style)
}
