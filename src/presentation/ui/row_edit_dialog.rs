//! Modal dialog editing the fields of one table row.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use tracing::debug;

use super::tab::TabId;
use super::utils::centered_fixed;
use crate::domain::errors::RowValidationError;
use crate::domain::rows::{ColumnDef, FieldEdit, RowKey, TableRow};
use crate::presentation::widgets::{Button, ButtonVariant, TextInput};

const DIALOG_WIDTH: u16 = 60;
const INPUT_HEIGHT: u16 = 3;

/// Outcome of a key press in the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEditAction {
    /// Keep the dialog open.
    None,
    /// Close without changes.
    Cancel,
    /// Apply the parsed edits to the target row.
    Submit(Vec<FieldEdit>),
}

struct EditField {
    column: &'static ColumnDef,
    input: TextInput,
}

/// Edits the editable fields of a row.
pub struct RowEditDialog {
    title: String,
    tab: TabId,
    key: RowKey,
    fields: Vec<EditField>,
    focus: usize,
    error: Option<String>,
}

impl RowEditDialog {
    /// Builds the dialog for `row`, prefilled with its current values.
    #[must_use]
    pub fn new<R: TableRow>(tab: TabId, row: &R) -> Self {
        let fields = R::editable_fields()
            .into_iter()
            .map(|column| {
                let value = row
                    .cell(column.key)
                    .map(|cell| cell.to_string())
                    .unwrap_or_default();
                EditField {
                    column,
                    input: TextInput::new(column.label).with_value(value),
                }
            })
            .collect();

        let mut dialog = Self {
            title: format!("Row Edit: {}", row.title_name()),
            tab,
            key: row.key(),
            fields,
            focus: 0,
            error: None,
        };
        dialog.update_focus();
        dialog
    }

    /// Dialog title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tab and row the edits apply to.
    #[must_use]
    pub const fn target(&self) -> (TabId, RowKey) {
        (self.tab, self.key)
    }

    /// Whether the row has any editable field.
    #[must_use]
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Inline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows an inline error and keeps the dialog open.
    pub fn set_error(&mut self, error: &RowValidationError) {
        self.error = Some(error.message.clone());
    }

    /// Current text of a field's input.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.column.key == field)
            .map(|f| f.input.value())
    }

    fn ok_index(&self) -> usize {
        self.fields.len()
    }

    fn cancel_index(&self) -> usize {
        self.fields.len() + 1
    }

    fn focus_count(&self) -> usize {
        self.fields.len() + 2
    }

    fn update_focus(&mut self) {
        let focus = self.focus;
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.input.set_focused(index == focus);
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.focus_count();
        self.update_focus();
    }

    fn focus_previous(&mut self) {
        self.focus = (self.focus + self.focus_count() - 1) % self.focus_count();
        self.update_focus();
    }

    fn parse(&mut self) -> Option<Vec<FieldEdit>> {
        let mut edits = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();
        for field in &self.fields {
            match field.column.kind.parse(field.column.key, field.input.value()) {
                Ok(value) => edits.push(FieldEdit::new(field.column.key, value)),
                Err(e) => errors.push(e),
            }
        }

        match RowValidationError::combine(errors) {
            Some(error) => {
                debug!(error = %error, "Row edit rejected");
                self.set_error(&error);
                None
            }
            None => Some(edits),
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> RowEditAction {
        match key.code {
            KeyCode::Esc => return RowEditAction::Cancel,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Enter if self.focus == self.cancel_index() => return RowEditAction::Cancel,
            KeyCode::Enter => {
                return self
                    .parse()
                    .map_or(RowEditAction::None, RowEditAction::Submit);
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    field.input.handle_key(key);
                }
            }
        }
        RowEditAction::None
    }

    fn height(&self) -> u16 {
        let fields = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        let error = u16::from(self.error.is_some()) * 2;
        fields
            .saturating_mul(INPUT_HEIGHT)
            .saturating_add(error)
            .saturating_add(4)
    }
}

impl Widget for &RowEditDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(DIALOG_WIDTH, self.height(), area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(INPUT_HEIGHT))
            .collect();
        if self.error.is_some() {
            constraints.push(Constraint::Length(2));
        }
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(1));
        let areas = Layout::vertical(constraints).split(inner);

        for (field, field_area) in self.fields.iter().zip(areas.iter()) {
            (&field.input).render(*field_area, buf);
        }

        if let Some(error) = &self.error {
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .render(areas[self.fields.len()], buf);
        }

        let Some(button_row) = areas.last() else {
            return;
        };
        let ok = Button::new("OK", ButtonVariant::Success).focused(self.focus == self.ok_index());
        let cancel =
            Button::new("Cancel", ButtonVariant::Error).focused(self.focus == self.cancel_index());
        let [_, ok_area, _, cancel_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(ok.width()),
            Constraint::Length(2),
            Constraint::Length(cancel.width()),
            Constraint::Fill(1),
        ])
        .areas(*button_row);
        ok.render(ok_area, buf);
        cancel.render(cancel_area, buf);
    }
}
