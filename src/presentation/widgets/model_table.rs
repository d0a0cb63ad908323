//! Reactive table bound to a set of domain rows.
//!
//! The table owns its rows and a rendered grid derived from them. Every
//! mutation of the row set ends with [`ModelTable::sync`], which reconciles
//! the grid: rows whose key appeared are appended, rows whose key vanished are
//! dropped, and cells whose formatted value changed are rewritten. The grid is
//! then reordered by the sort column, if one is set.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, StatefulWidget, Table, TableState, Widget},
};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use crate::domain::errors::{RowValidationError, TableError};
use crate::domain::rows::{CellValue, DEFAULT_TIMESTAMP_FORMAT, FieldEdit, RowKey, TableRow};

const MAX_COLUMN_WIDTH: usize = 40;

/// Direction of the sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Changes made to the rendered grid by one sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows appended to the grid.
    pub added: usize,
    /// Rows dropped from the grid.
    pub removed: usize,
    /// Rows whose cells were rewritten.
    pub updated: usize,
}

impl SyncReport {
    /// Returns whether the sync changed nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.updated == 0
    }
}

/// Result of a key press on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// Key not used.
    Ignored,
    /// Cursor moved or other internal change.
    Consumed,
    /// The row under the cursor was selected for editing.
    EditRow(RowKey),
    /// The row under the cursor was deleted.
    Removed(RowKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderedRow {
    key: RowKey,
    cells: Vec<String>,
}

/// A table of `R` rows with a synchronized rendered grid.
pub struct ModelTable<R: TableRow> {
    title: String,
    data: Vec<R>,
    rendered: Vec<RenderedRow>,
    sort: Option<(&'static str, SortOrder)>,
    state: TableState,
    focused: bool,
    timestamp_format: String,
    zebra_stripes: bool,
}

impl<R: TableRow> ModelTable<R> {
    /// Creates an empty, unsorted table.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data: Vec::new(),
            rendered: Vec::new(),
            sort: None,
            state: TableState::default(),
            focused: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            zebra_stripes: true,
        }
    }

    /// Sorts the grid by a field.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidSortColumn`] if `R` has no such field.
    pub fn with_sort_column(mut self, field: &str, order: SortOrder) -> Result<Self, TableError> {
        let Some(column) = R::column(field) else {
            return Err(TableError::InvalidSortColumn {
                column: field.to_string(),
                options: R::field_names(),
            });
        };
        self.sort = Some((column.key, order));
        self.sync();
        Ok(self)
    }

    /// Sets the `strftime` format for timestamp cells.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Enables alternating row backgrounds.
    #[must_use]
    pub const fn with_zebra_stripes(mut self, enabled: bool) -> Self {
        self.zebra_stripes = enabled;
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns whether a row with `key` exists.
    #[must_use]
    pub fn contains(&self, key: RowKey) -> bool {
        self.data.iter().any(|row| row.key() == key)
    }

    /// Looks up a row.
    #[must_use]
    pub fn row(&self, key: RowKey) -> Option<&R> {
        self.data.iter().find(|row| row.key() == key)
    }

    /// Adds a row unless one with the same key is present.
    pub fn add_item(&mut self, row: R) -> bool {
        let key = row.key();
        if self.contains(key) {
            debug!(%key, "Row already present, ignoring");
            return false;
        }
        self.data.push(row);
        self.sync();
        true
    }

    /// Removes the row with the given key.
    pub fn remove(&mut self, key: RowKey) -> Option<R> {
        let index = self.data.iter().position(|row| row.key() == key)?;
        let row = self.data.remove(index);
        self.sync();
        Some(row)
    }

    /// Removes every row.
    pub fn clear_data(&mut self) {
        self.data.clear();
        self.sync();
    }

    /// Replaces the row set; duplicate keys keep the first row.
    pub fn replace_data(&mut self, rows: impl IntoIterator<Item = R>) {
        let mut seen = HashSet::new();
        self.data = rows.into_iter().filter(|row| seen.insert(row.key())).collect();
        self.state.select(None);
        self.sync();
    }

    /// Applies dialog edits to a row and refreshes the grid.
    ///
    /// # Errors
    /// Returns the row's validation error, or an error if the row is gone.
    pub fn apply_edits(&mut self, key: RowKey, edits: &[FieldEdit]) -> Result<(), RowValidationError> {
        let row = self
            .data
            .iter_mut()
            .find(|row| row.key() == key)
            .ok_or_else(|| RowValidationError::general("Row no longer exists"))?;
        row.apply_edits(edits)?;
        self.sync();
        Ok(())
    }

    /// Reconciles the rendered grid with the row set.
    pub fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let fields = R::field_names();
        let keys: HashSet<RowKey> = self.data.iter().map(TableRow::key).collect();

        let before = self.rendered.len();
        self.rendered.retain(|rendered| keys.contains(&rendered.key));
        report.removed = before - self.rendered.len();

        for row in &self.data {
            let key = row.key();
            let cells = format_cells(row, &fields, &self.timestamp_format);
            match self.rendered.iter_mut().find(|rendered| rendered.key == key) {
                Some(existing) => {
                    if existing.cells != cells {
                        existing.cells = cells;
                        report.updated += 1;
                    }
                }
                None => {
                    self.rendered.push(RenderedRow { key, cells });
                    report.added += 1;
                }
            }
        }

        self.apply_sort();
        self.clamp_cursor();

        if !report.is_empty() {
            trace!(
                table = %self.title,
                added = report.added,
                removed = report.removed,
                updated = report.updated,
                "Table synced"
            );
        }
        report
    }

    fn apply_sort(&mut self) {
        let Some((field, order)) = self.sort else {
            return;
        };

        let values: HashMap<RowKey, CellValue> = self
            .data
            .iter()
            .filter_map(|row| row.cell(field).map(|value| (row.key(), value)))
            .collect();

        self.rendered.sort_by(|a, b| {
            let ordering = match (values.get(&a.key), values.get(&b.key)) {
                (Some(x), Some(y)) => x.compare(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    fn clamp_cursor(&mut self) {
        let len = self.rendered.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(index) if index >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Row keys in rendered order.
    #[must_use]
    pub fn rendered_keys(&self) -> Vec<RowKey> {
        self.rendered.iter().map(|rendered| rendered.key).collect()
    }

    /// Formatted cells of a rendered row.
    #[must_use]
    pub fn rendered_cells(&self, key: RowKey) -> Option<&[String]> {
        self.rendered
            .iter()
            .find(|rendered| rendered.key == key)
            .map(|rendered| rendered.cells.as_slice())
    }

    /// Key of the row under the cursor.
    #[must_use]
    pub fn selected_key(&self) -> Option<RowKey> {
        self.state
            .selected()
            .and_then(|index| self.rendered.get(index))
            .map(|rendered| rendered.key)
    }

    /// Moves the cursor down.
    pub fn select_next(&mut self) {
        if self.rendered.is_empty() {
            return;
        }
        let next = self
            .state
            .selected()
            .map_or(0, |index| (index + 1).min(self.rendered.len() - 1));
        self.state.select(Some(next));
    }

    /// Moves the cursor up.
    pub fn select_previous(&mut self) {
        if self.rendered.is_empty() {
            return;
        }
        let previous = self
            .state
            .selected()
            .map_or(0, |index| index.saturating_sub(1));
        self.state.select(Some(previous));
    }

    /// Deletes the row under the cursor and moves the cursor up one row.
    pub fn remove_selected(&mut self) -> Option<RowKey> {
        let cursor = self.state.selected()?;
        let key = self.selected_key()?;
        self.remove(key)?;
        if !self.rendered.is_empty() {
            self.state.select(Some(cursor.saturating_sub(1)));
        }
        debug!(%key, "Removed row");
        Some(key)
    }

    /// Handles navigation, edit and delete keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        match key.code {
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Home if !self.rendered.is_empty() => self.state.select(Some(0)),
            KeyCode::End if !self.rendered.is_empty() => {
                self.state.select(Some(self.rendered.len() - 1));
            }
            KeyCode::Enter => {
                return self
                    .selected_key()
                    .map_or(TableAction::Consumed, TableAction::EditRow);
            }
            KeyCode::Delete if !self.data.is_empty() => {
                return self
                    .remove_selected()
                    .map_or(TableAction::Consumed, TableAction::Removed);
            }
            _ => return TableAction::Ignored,
        }
        TableAction::Consumed
    }

    fn column_widths(&self) -> Vec<Constraint> {
        R::columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let widest = self
                    .rendered
                    .iter()
                    .filter_map(|rendered| rendered.cells.get(index))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
                    .max(column.label.width())
                    .min(MAX_COLUMN_WIDTH);
                Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
            })
            .collect()
    }
}

fn format_cells<R: TableRow>(row: &R, fields: &[&str], timestamp_format: &str) -> Vec<String> {
    fields
        .iter()
        .map(|field| {
            row.cell(field)
                .map(|value| value.format(timestamp_format))
                .unwrap_or_default()
        })
        .collect()
}

impl<R: TableRow> Widget for &mut ModelTable<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let header = Row::new(R::columns().iter().map(|column| column.label)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let zebra = self.zebra_stripes;
        let rows = self.rendered.iter().enumerate().map(|(index, rendered)| {
            let style = if zebra && index % 2 == 1 {
                Style::default().bg(Color::Indexed(236))
            } else {
                Style::default()
            };
            Row::new(rendered.cells.iter().map(String::as_str)).style(style)
        });

        let highlight = if self.focused {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };

        let title = format!(" {} ({}) ", self.title, self.rendered.len());
        let table = Table::new(rows, self.column_widths())
            .header(header)
            .column_spacing(2)
            .row_highlight_style(highlight)
            .highlight_symbol("> ")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );

        StatefulWidget::render(table, area, buf, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocationId, StockItem};
    use crate::domain::rows::{FieldValue, StockItemRow};
    use crossterm::event::KeyModifiers;

    fn row(pk: u64, part: &str, quantity: f64) -> StockItemRow {
        StockItemRow::new(
            StockItem::new(pk, 1_u64, quantity)
                .with_part_name(part)
                .with_location(LocationId(1), "Shelf A"),
        )
    }

    fn table() -> ModelTable<StockItemRow> {
        ModelTable::new("Items")
            .with_sort_column("part_name", SortOrder::Ascending)
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_invalid_sort_column() {
        let err = ModelTable::<StockItemRow>::new("Items")
            .with_sort_column("colour", SortOrder::Ascending)
            .err()
            .unwrap();

        assert_eq!(
            err,
            TableError::InvalidSortColumn {
                column: "colour".to_string(),
                options: vec!["stock_number", "part_name", "quantity", "current_location"],
            }
        );
    }

    #[test]
    fn test_add_item_ignores_duplicate_keys() {
        let mut table = table();
        assert!(table.add_item(row(338, "Resistor", 10.0)));
        assert!(!table.add_item(row(338, "Resistor", 10.0)));

        assert_eq!(table.len(), 1);
        assert_eq!(table.rendered_keys(), vec![RowKey(338)]);
    }

    #[test]
    fn test_rendered_order_follows_sort_column() {
        let mut table = table();
        table.add_item(row(1, "Zener", 1.0));
        table.add_item(row(2, "capacitor", 1.0));
        table.add_item(row(3, "Bolt", 1.0));

        assert_eq!(table.rendered_keys(), vec![RowKey(3), RowKey(2), RowKey(1)]);
        assert_eq!(
            table.data().iter().map(TableRow::key).collect::<Vec<_>>(),
            vec![RowKey(1), RowKey(2), RowKey(3)]
        );
    }

    #[test]
    fn test_descending_sort() {
        let mut table = ModelTable::<StockItemRow>::new("Items")
            .with_sort_column("quantity", SortOrder::Descending)
            .unwrap();
        table.add_item(row(1, "A", 1.0));
        table.add_item(row(2, "B", 5.0));

        assert_eq!(table.rendered_keys(), vec![RowKey(2), RowKey(1)]);
    }

    #[test]
    fn test_sync_reports_changes() {
        let mut table = ModelTable::<StockItemRow>::new("Items");
        table.data.push(row(1, "A", 4.0));
        table.data.push(row(2, "B", 4.0));
        assert_eq!(
            table.sync(),
            SyncReport {
                added: 2,
                removed: 0,
                updated: 0
            }
        );

        table.data[0]
            .apply_edits(&[FieldEdit::new("quantity", FieldValue::Number(2.0))])
            .unwrap();
        table.data.remove(1);
        assert_eq!(
            table.sync(),
            SyncReport {
                added: 0,
                removed: 1,
                updated: 1
            }
        );
        assert!(table.sync().is_empty());
    }

    #[test]
    fn test_apply_edits_updates_cells() {
        let mut table = table();
        table.add_item(row(7, "Nut", 10.0));

        table
            .apply_edits(
                RowKey(7),
                &[FieldEdit::new("quantity", FieldValue::Number(2.5))],
            )
            .unwrap();

        assert_eq!(
            table.rendered_cells(RowKey(7)).unwrap(),
            &["7", "Nut", "2.5", "Shelf A"]
        );
    }

    #[test]
    fn test_apply_edits_keeps_row_on_error() {
        let mut table = table();
        table.add_item(row(7, "Nut", 10.0));

        let err = table
            .apply_edits(
                RowKey(7),
                &[FieldEdit::new("quantity", FieldValue::Number(20.0))],
            )
            .unwrap_err();

        assert!(err.message.contains("greater than the original"));
        assert_eq!(table.rendered_cells(RowKey(7)).unwrap()[2], "10");
        assert!(table.apply_edits(RowKey(99), &[]).is_err());
    }

    #[test]
    fn test_delete_moves_cursor_up() {
        let mut table = table();
        table.add_item(row(1, "A", 1.0));
        table.add_item(row(2, "B", 1.0));
        table.add_item(row(3, "C", 1.0));
        table.handle_key(key(KeyCode::End));
        assert_eq!(table.state.selected(), Some(2));

        assert_eq!(table.handle_key(key(KeyCode::Delete)), TableAction::Removed(RowKey(3)));
        assert_eq!(table.state.selected(), Some(1));
        assert_eq!(table.selected_key(), Some(RowKey(2)));
    }

    #[test]
    fn test_delete_on_empty_table_is_ignored() {
        let mut table = table();
        assert_eq!(table.handle_key(key(KeyCode::Delete)), TableAction::Ignored);
        assert_eq!(table.state.selected(), None);
    }

    #[test]
    fn test_enter_requests_edit() {
        let mut table = table();
        table.add_item(row(1, "A", 1.0));

        assert_eq!(table.handle_key(key(KeyCode::Enter)), TableAction::EditRow(RowKey(1)));
    }

    #[test]
    fn test_clear_data() {
        let mut table = table();
        table.add_item(row(1, "A", 1.0));
        table.clear_data();

        assert!(table.is_empty());
        assert!(table.rendered_keys().is_empty());
        assert_eq!(table.selected_key(), None);
    }

    #[test]
    fn test_replace_data_drops_duplicates() {
        let mut table = table();
        table.replace_data(vec![row(1, "A", 1.0), row(1, "A", 2.0), row(2, "B", 1.0)]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rendered_cells(RowKey(1)).unwrap()[2], "1");
    }

    #[test]
    fn test_render_shows_headers_and_cells() {
        let mut table = table();
        table.add_item(row(338, "Resistor", 10.0));

        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        (&mut table).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Stock Number"));
        assert!(text.contains("Resistor"));
        assert!(text.contains("Items (1)"));
    }
}
