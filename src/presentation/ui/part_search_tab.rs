//! Part search tab.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::tab::TabAction;
use crate::domain::entities::Part;
use crate::domain::errors::RowValidationError;
use crate::domain::rows::{FieldEdit, PartRow, RowKey};
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{ModelTable, StatusBar, TableAction, TextInput};

/// Looks up parts by name or IPN.
pub struct PartSearchTab {
    input: TextInput,
    table: ModelTable<PartRow>,
    status: StatusBar,
    table_focused: bool,
}

impl PartSearchTab {
    /// Creates an empty search tab.
    #[must_use]
    pub fn new(ui: &UiConfig) -> Self {
        let mut input = TextInput::new("Search Parts").placeholder("Name or IPN");
        input.set_focused(true);

        Self {
            input,
            table: ModelTable::new("Parts")
                .with_timestamp_format(ui.timestamp_format.as_str())
                .with_zebra_stripes(ui.zebra_stripes),
            status: StatusBar::new(),
            table_focused: false,
        }
    }

    fn set_table_focused(&mut self, focused: bool) {
        self.table_focused = focused;
        self.input.set_focused(!focused);
        self.table.set_focused(focused);
    }

    /// Replaces the listed parts with a search result.
    pub fn show_results(&mut self, parts: Vec<Part>) {
        self.table.replace_data(parts.into_iter().map(PartRow::new));
        self.status = StatusBar::new();
    }

    /// Shows a failed search in the status line.
    pub fn show_error(&mut self, message: &str) {
        self.status = StatusBar::error(message);
    }

    /// Search results table.
    #[must_use]
    pub const fn table(&self) -> &ModelTable<PartRow> {
        &self.table
    }

    /// Looks up a result row.
    #[must_use]
    pub fn row(&self, key: RowKey) -> Option<&PartRow> {
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

    /// Handles a key press. Enter searches without clearing the query.
    pub fn handle_key(&mut self, key: KeyEvent) -> TabAction {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.set_table_focused(!self.table_focused);
            return TabAction::None;
        }

        if self.table_focused {
            return match self.table.handle_key(key) {
                TableAction::EditRow(row) => TabAction::EditRow(row),
                _ => TabAction::None,
            };
        }

        if EventHandler::is_submit_event(&key) {
            return TabAction::SearchParts(self.input.value().trim().to_string());
        }
        self.input.handle_key(key);
        TabAction::None
    }
}

impl Widget for &mut PartSearchTab {
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
    use crate::domain::entities::PartId;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_keeps_query() {
        let mut tab = PartSearchTab::new(&UiConfig::default());
        for c in "res".chars() {
            tab.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(
            tab.handle_key(key(KeyCode::Enter)),
            TabAction::SearchParts("res".to_string())
        );
        assert_eq!(tab.input.value(), "res");
    }

    #[test]
    fn test_results_and_errors_update_status() {
        let mut tab = PartSearchTab::new(&UiConfig::default());
        tab.show_error("request timed out");
        assert_eq!(tab.status().message(), "Error: request timed out");

        tab.show_results(vec![Part::new(PartId(3), "Resistor 10k")]);
        assert_eq!(tab.status().message(), "Status Ok");
        assert_eq!(tab.table().len(), 1);
    }
}
