//! Status line widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Initial status text.
pub const STATUS_OK: &str = "Status Ok";

/// Status severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// Status line with a message and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates the initial `Status Ok` line.
    #[must_use]
    pub fn new() -> Self {
        Self::info(STATUS_OK)
    }

    /// Creates info status.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Info,
        }
    }

    /// Creates success status.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Success,
        }
    }

    /// Creates error status; the text is prefixed with `Error: `.
    #[must_use]
    pub fn error(message: impl AsRef<str>) -> Self {
        Self {
            message: format!("Error: {}", message.as_ref()),
            level: StatusLevel::Error,
        }
    }

    /// Status text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        Paragraph::new(Line::from(Span::styled(self.message.as_str(), style))).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ok() {
        let status = StatusBar::default();
        assert_eq!(status.message(), STATUS_OK);
        assert_eq!(status.level, StatusLevel::Info);
    }

    #[test]
    fn test_error_prefix() {
        let status = StatusBar::error("Destination not set.");
        assert_eq!(status.message(), "Error: Destination not set.");
        assert_eq!(status.level.color(), Color::Red);
    }
}
