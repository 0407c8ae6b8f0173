//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Store data lives in one immutable snapshot that is replaced after every
//! mutation.

use crate::audit::AuditLogger;
use crate::config::Settings;
use crate::models::{Transaction, TransactionId, TransactionWithBalance};
use crate::reports::DailyExpenses;
use crate::services::{DashboardSnapshot, TransactionFilter};
use crate::storage::Store;

use super::dialogs::edit::EditFormState;
use super::dialogs::transaction::TransactionFormState;
use super::dialogs::transfer::TransferFormState;
use super::widgets::{Notification, NotificationQueue, TextInput};

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the history search box
    Search,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddTransaction,
    EditTransaction(TransactionId),
    Transfer,
    ConfirmDelete(TransactionId),
    Help,
}

/// Main application state
pub struct App<'a> {
    pub store: &'a dyn Store,

    pub audit: &'a AuditLogger,

    pub settings: &'a Settings,

    /// Last fetched projections
    pub snapshot: DashboardSnapshot,

    /// Chart buckets derived from the snapshot
    pub daily: DailyExpenses,

    pub should_quit: bool,

    pub input_mode: InputMode,

    pub active_dialog: ActiveDialog,

    /// Search text and category selector for the history table
    pub filter: TransactionFilter,

    pub search_input: TextInput,

    /// Selected row within the filtered history
    pub selected_index: usize,

    pub transaction_form: TransactionFormState,

    pub edit_form: EditFormState,

    pub transfer_form: TransferFormState,

    pub notifications: NotificationQueue,
}

impl<'a> App<'a> {
    pub fn new(store: &'a dyn Store, audit: &'a AuditLogger, settings: &'a Settings) -> Self {
        let snapshot = DashboardSnapshot::empty();
        let daily = snapshot.daily_expenses(settings.day_boundary);
        Self {
            store,
            audit,
            settings,
            snapshot,
            daily,
            should_quit: false,
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            filter: TransactionFilter::new(),
            search_input: TextInput::new().placeholder("press / to search"),
            selected_index: 0,
            transaction_form: TransactionFormState::new(settings.default_payment_account),
            edit_form: EditFormState::default(),
            transfer_form: TransferFormState::new(),
            notifications: NotificationQueue::new(),
        }
    }

    /// Re-fetch all projections, keeping the old value of any that fail
    pub fn refresh(&mut self) {
        let (snapshot, error) = self.snapshot.refreshed(self.store);
        self.snapshot = snapshot;
        self.daily = self.snapshot.daily_expenses(self.settings.day_boundary);
        self.clamp_selection();

        if let Some(e) = error {
            self.notify(Notification::error(format!("Failed to load data: {}", e)));
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// History rows passing the current filter, newest first
    pub fn visible_transactions(&self) -> Vec<&TransactionWithBalance> {
        self.filter.apply(&self.snapshot.transactions)
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible_transactions()
            .get(self.selected_index)
            .copied()
            .map(|row| &row.transaction)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.visible_transactions().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.visible_transactions().len().saturating_sub(1);
    }

    /// Keep the selection inside the filtered list
    pub fn clamp_selection(&mut self) {
        let count = self.visible_transactions().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Copy the search box into the filter
    pub fn apply_search(&mut self) {
        self.filter.query = self.search_input.value().to_string();
        self.selected_index = 0;
    }

    pub fn clear_filter(&mut self) {
        self.search_input.clear();
        self.filter = TransactionFilter::new();
        self.selected_index = 0;
    }

    pub fn next_category_filter(&mut self) {
        self.filter.category = self.filter.category.next();
        self.selected_index = 0;
    }

    pub fn prev_category_filter(&mut self) {
        self.filter.category = self.filter.category.prev();
        self.selected_index = 0;
    }

    /// Open a dialog, resetting its form
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match dialog {
            ActiveDialog::AddTransaction => {
                self.transaction_form =
                    TransactionFormState::new(self.settings.default_payment_account);
            }
            ActiveDialog::EditTransaction(id) => {
                match self.snapshot.find(id) {
                    Some(row) => self.edit_form = EditFormState::from_transaction(&row.transaction),
                    None => return,
                }
            }
            ActiveDialog::Transfer => {
                self.transfer_form = TransferFormState::new();
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }
}
