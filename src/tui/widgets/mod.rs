//! Reusable widgets for the TUI

pub mod input;
pub mod notification;

pub use input::{render_choice, render_field, TextInput};
pub use notification::{Notification, NotificationQueue, NotificationType, NotificationWidget};
