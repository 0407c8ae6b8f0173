//! Toast notification widget
//!
//! Short-lived messages shown after a mutation succeeds or fails.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Error,
}

impl NotificationType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => " Info ",
            Self::Success => " Success ",
            Self::Error => " Error ",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        // Errors stay up longer
        let secs = match notification_type {
            NotificationType::Error => 6,
            _ => 3,
        };
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(secs),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Widget for rendering a notification
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.notification.notification_type.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(self.notification.notification_type.title())
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Notifications waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drop the current notification once its time is up
    pub fn remove_expired(&mut self) {
        if self.notifications.first().is_some_and(Notification::is_expired) {
            self.notifications.remove(0);
            if let Some(next) = self.notifications.first_mut() {
                next.created_at = Instant::now();
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn dismiss(&mut self) {
        if !self.notifications.is_empty() {
            self.notifications.remove(0);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}
