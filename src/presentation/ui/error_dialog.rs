//! Modal error dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::utils::centered_fixed;
use crate::presentation::widgets::{Button, ButtonVariant};

const MAX_WIDTH: u16 = 70;
const MAX_HEIGHT: u16 = 16;

/// Error shown on top of the active tab until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    title: String,
    message: String,
}

impl ErrorDialog {
    /// Creates a dialog.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Dialog title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true when the key dismisses the dialog.
    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let widest_line = self
            .message
            .lines()
            .map(UnicodeWidthStr::width)
            .chain(std::iter::once(self.title.width() + 2))
            .max()
            .unwrap_or(0);
        let width = u16::try_from(widest_line)
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .clamp(24, MAX_WIDTH);

        let inner_width = usize::from(width.saturating_sub(2).max(1));
        let lines: usize = self
            .message
            .lines()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        let height = u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(MAX_HEIGHT);

        centered_fixed(width, height, area)
    }
}

impl Widget for &ErrorDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.popup_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.title));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [message_area, button_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        Paragraph::new(self.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .render(message_area, buf);

        let button = Button::new("OK", ButtonVariant::Error).focused(true);
        let width = button.width().min(button_area.width);
        let x = button_area.x + (button_area.width - width) / 2;
        button.render(Rect::new(x, button_area.y, width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use test_case::test_case;

    #[test_case(KeyCode::Enter, true ; "enter")]
    #[test_case(KeyCode::Esc, true ; "escape")]
    #[test_case(KeyCode::Char(' '), true ; "space")]
    #[test_case(KeyCode::Char('x'), false ; "other")]
    fn test_dismiss_keys(code: KeyCode, dismissed: bool) {
        let dialog = ErrorDialog::new("Scan Error", "No match found for barcode data");
        assert_eq!(
            dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
            dismissed
        );
    }

    #[test]
    fn test_render_shows_title_and_message() {
        let dialog = ErrorDialog::new(
            "Submission Error",
            "No items have been scanned yet.\nDestination not set.",
        );
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&dialog).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Submission Error"));
        assert!(text.contains("No items have been scanned yet."));
        assert!(text.contains("Destination not set."));
        assert!(text.contains("OK"));
    }
}
