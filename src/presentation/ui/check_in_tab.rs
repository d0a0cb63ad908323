//! Check-in tab: returns scanned items to their part's default location.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::tab::TabAction;
use super::transfer_tab::submit_or_edit;
use crate::application::dto::CheckInRecord;
use crate::domain::errors::{RowValidationError, TableError};
use crate::domain::rows::{CheckInRow, FieldEdit, RowKey};
use crate::infrastructure::config::UiConfig;
use crate::presentation::widgets::{ModelTable, SortOrder, StatusBar, TableAction, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckInFocus {
    Input,
    Table,
}

/// Scans stock items and logs each completed check-in, newest first.
pub struct CheckInTab {
    input: TextInput,
    table: ModelTable<CheckInRow>,
    status: StatusBar,
    focus: CheckInFocus,
    next_entry: u64,
}

impl CheckInTab {
    /// # Errors
    /// Returns an error if the table's sort column is unknown.
    pub fn new(ui: &UiConfig) -> Result<Self, TableError> {
        let table = ModelTable::new("Checked In")
            .with_sort_column("timestamp", SortOrder::Descending)?
            .with_timestamp_format(ui.timestamp_format.as_str())
            .with_zebra_stripes(ui.zebra_stripes);

        let mut input = TextInput::new("Check-In").placeholder("Scan Items to Check In");
        input.set_focused(true);

        Ok(Self {
            input,
            table,
            status: StatusBar::new(),
            focus: CheckInFocus::Input,
            next_entry: 1,
        })
    }

    fn set_focus(&mut self, focus: CheckInFocus) {
        self.focus = focus;
        self.input.set_focused(focus == CheckInFocus::Input);
        self.table.set_focused(focus == CheckInFocus::Table);
    }

    /// Logs a completed check-in.
    pub fn record(&mut self, record: &CheckInRecord) -> RowKey {
        let entry = self.next_entry;
        self.next_entry += 1;

        let row = CheckInRow::new(
            entry,
            &record.item,
            record.previous_location.as_str(),
            record.new_location.as_str(),
            record.timestamp,
        );
        self.table.add_item(row);
        self.status = StatusBar::success(format!(
            "Checked in Stock #{} to {}",
            record.item.id(),
            record.new_location
        ));
        RowKey(entry)
    }

    /// Check-in log table.
    #[must_use]
    pub const fn table(&self) -> &ModelTable<CheckInRow> {
        &self.table
    }

    /// Looks up a logged row.
    #[must_use]
    pub fn row(&self, key: RowKey) -> Option<&CheckInRow> {
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

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> TabAction {
        match (key.code, self.focus) {
            (KeyCode::Tab | KeyCode::BackTab, CheckInFocus::Input) => {
                self.set_focus(CheckInFocus::Table);
                TabAction::None
            }
            (KeyCode::Tab | KeyCode::BackTab, CheckInFocus::Table) => {
                self.set_focus(CheckInFocus::Input);
                TabAction::None
            }
            (_, CheckInFocus::Input) => submit_or_edit(&mut self.input, key, TabAction::CheckIn),
            (_, CheckInFocus::Table) => match self.table.handle_key(key) {
                TableAction::EditRow(row) => TabAction::EditRow(row),
                _ => TabAction::None,
            },
        }
    }
}

impl Widget for &mut CheckInTab {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [input_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        (&self.input).render(input_area, buf);
        (&mut self.table).render(table_area, buf);
        (&self.status).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocationId, StockItem};
    use chrono::{Duration, Local};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record(pk: u64, minutes_ago: i64) -> CheckInRecord {
        CheckInRecord {
            item: StockItem::new(pk, 1_u64, 3.0)
                .with_part_name("Screw")
                .with_location(LocationId(2), "Bench"),
            previous_location: "Bench".to_string(),
            new_location: "Drawer 7".to_string(),
            timestamp: Local::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_scan_requests_check_in() {
        let mut tab = CheckInTab::new(&UiConfig::default()).unwrap();
        for c in "338".chars() {
            tab.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(
            tab.handle_key(key(KeyCode::Enter)),
            TabAction::CheckIn("338".to_string())
        );
        assert!(tab.input.value().is_empty());
    }

    #[test]
    fn test_newest_check_in_first() {
        let mut tab = CheckInTab::new(&UiConfig::default()).unwrap();
        let older = tab.record(&record(1, 10));
        let newer = tab.record(&record(2, 0));

        assert_eq!(tab.table().rendered_keys(), vec![newer, older]);
        assert_eq!(tab.status().message(), "Checked in Stock #2 to Drawer 7");
    }

    #[test]
    fn test_same_item_checked_in_twice() {
        let mut tab = CheckInTab::new(&UiConfig::default()).unwrap();
        tab.record(&record(5, 2));
        tab.record(&record(5, 1));

        assert_eq!(tab.table().len(), 2);
    }
}
