//! Stock transfer tab.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::tab::TabAction;
use crate::application::dto::TransferOutcome;
use crate::domain::entities::{StockItem, StockLocation};
use crate::domain::errors::{RowValidationError, TableError, TransferError};
use crate::domain::rows::{FieldEdit, RowKey, StockItemRow};
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    Button, ButtonVariant, LabeledText, ModelTable, SortOrder, StatusBar, TableAction, TextInput,
};

const NO_DESTINATION: &str = "None";

/// Focusable parts of the transfer tab, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFocus {
    /// Destination scan input.
    Destination,
    /// Item scan input.
    Items,
    /// Scanned items table.
    Table,
    /// Done button.
    Done,
    /// Cancel button.
    Cancel,
}

impl TransferFocus {
    const ORDER: [Self; 5] = [
        Self::Destination,
        Self::Items,
        Self::Table,
        Self::Done,
        Self::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Scans a destination and stock items, then moves the items there.
pub struct TransferTab {
    destination_input: TextInput,
    item_input: TextInput,
    destination: Option<StockLocation>,
    table: ModelTable<StockItemRow>,
    status: StatusBar,
    focus: TransferFocus,
}

impl TransferTab {
    /// Creates the tab with focus on the destination input.
    ///
    /// # Errors
    /// Returns an error if the table's sort column is unknown.
    pub fn new(ui: &UiConfig) -> Result<Self, TableError> {
        let table = ModelTable::new("Items")
            .with_sort_column("part_name", SortOrder::Ascending)?
            .with_timestamp_format(ui.timestamp_format.as_str())
            .with_zebra_stripes(ui.zebra_stripes);

        let mut tab = Self {
            destination_input: TextInput::new("Destination").placeholder("Scan Location Barcode"),
            item_input: TextInput::new("Items").placeholder("Scan Items"),
            destination: None,
            table,
            status: StatusBar::new(),
            focus: TransferFocus::Destination,
        };
        tab.set_focus(TransferFocus::Destination);
        Ok(tab)
    }

    /// Moves focus.
    pub fn set_focus(&mut self, focus: TransferFocus) {
        self.focus = focus;
        self.destination_input
            .set_focused(focus == TransferFocus::Destination);
        self.item_input.set_focused(focus == TransferFocus::Items);
        self.table.set_focused(focus == TransferFocus::Table);
    }

    /// Scanned destination, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<&StockLocation> {
        self.destination.as_ref()
    }

    /// Sets the destination and moves focus to the item input.
    pub fn set_destination(&mut self, location: StockLocation) {
        self.destination = Some(location);
        self.set_focus(TransferFocus::Items);
    }

    /// Adds a scanned item. Returns false if it was already listed.
    pub fn add_item(&mut self, item: StockItem) -> bool {
        self.table.add_item(StockItemRow::new(item))
    }

    /// Items to transfer, with any edited quantities.
    #[must_use]
    pub fn items(&self) -> Vec<StockItem> {
        self.table
            .data()
            .iter()
            .map(|row| row.item().clone())
            .collect()
    }

    /// Scanned items table.
    #[must_use]
    pub const fn table(&self) -> &ModelTable<StockItemRow> {
        &self.table
    }

    /// Looks up a scanned row.
    #[must_use]
    pub fn row(&self, key: RowKey) -> Option<&StockItemRow> {
        self.table.row(key)
    }

    /// Applies edits from the row edit dialog.
    ///
    /// # Errors
    /// Returns the validation error raised by the row.
    pub fn apply_edits(&mut self, key: RowKey, edits: &[FieldEdit]) -> Result<(), RowValidationError> {
        self.table.apply_edits(key, edits)
    }

    /// Current status line.
    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, status: StatusBar) {
        self.status = status;
    }

    /// Reports a rejected submission and focuses the input that needs attention.
    pub fn show_validation(&mut self, error: &TransferError) {
        self.status = StatusBar::error(error.joined(" "));

        let problems = error.problems();
        if problems.contains(&&TransferError::NoDestination) {
            self.set_focus(TransferFocus::Destination);
        } else if problems.contains(&&TransferError::NoItems) {
            self.set_focus(TransferFocus::Items);
        }
    }

    /// Reports a completed transfer and empties the table.
    pub fn complete(&mut self, outcome: &TransferOutcome) {
        self.status = StatusBar::success(outcome.summary());
        self.table.clear_data();
        self.set_focus(TransferFocus::Items);
    }

    /// Drops every scanned item.
    pub fn cancel(&mut self) {
        self.table.clear_data();
        self.status = StatusBar::new();
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> TabAction {
        match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return TabAction::None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.previous());
                return TabAction::None;
            }
            _ => {}
        }

        match self.focus {
            TransferFocus::Destination => {
                submit_or_edit(&mut self.destination_input, key, TabAction::ScanDestination)
            }
            TransferFocus::Items => {
                submit_or_edit(&mut self.item_input, key, TabAction::ScanItem)
            }
            TransferFocus::Table => match self.table.handle_key(key) {
                TableAction::EditRow(row) => TabAction::EditRow(row),
                _ => TabAction::None,
            },
            TransferFocus::Done if EventHandler::is_submit_event(&key) => {
                TabAction::SubmitTransfer
            }
            TransferFocus::Cancel if EventHandler::is_submit_event(&key) => {
                self.cancel();
                TabAction::None
            }
            TransferFocus::Done | TransferFocus::Cancel => TabAction::None,
        }
    }
}

/// Submits the trimmed input on Enter, clearing it; otherwise edits it.
///
/// Empty input is submitted too so the scan reports it.
pub(super) fn submit_or_edit(
    input: &mut TextInput,
    key: KeyEvent,
    action: fn(String) -> TabAction,
) -> TabAction {
    if EventHandler::is_submit_event(&key) {
        return action(input.take().trim().to_string());
    }
    input.handle_key(key);
    TabAction::None
}

impl Widget for &mut TransferTab {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [destination_area, label_area, items_area, table_area, buttons_area, status_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        (&self.destination_input).render(destination_area, buf);
        let destination = self
            .destination
            .as_ref()
            .map_or(NO_DESTINATION, StockLocation::name);
        LabeledText::new("Destination", destination).render(label_area, buf);
        (&self.item_input).render(items_area, buf);
        (&mut self.table).render(table_area, buf);

        let done = Button::new("Done", ButtonVariant::Success)
            .focused(self.focus == TransferFocus::Done);
        let cancel = Button::new("Cancel", ButtonVariant::Error)
            .focused(self.focus == TransferFocus::Cancel);
        let [done_area, _, cancel_area, _] = Layout::horizontal([
            Constraint::Length(done.width()),
            Constraint::Length(2),
            Constraint::Length(cancel.width()),
            Constraint::Fill(1),
        ])
        .areas(buttons_area);
        done.render(done_area, buf);
        cancel.render(cancel_area, buf);

        (&self.status).render(status_area, buf);
    }
}
