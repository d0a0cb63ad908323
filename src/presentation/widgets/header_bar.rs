use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// State of the connection to the InvenTree server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Health check in flight.
    #[default]
    Connecting,
    /// Server answered.
    Connected,
    /// Server unreachable.
    Error,
}

impl ConnectionStatus {
    /// Status label.
    #[must_use]
    pub const fn display_text(self) -> &'static str {
        match self {
            Self::Connecting => "CONNECTING",
            Self::Connected => "CONNECTED",
            Self::Error => "OFFLINE",
        }
    }

    /// Status indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Connected => "●",
            Self::Connecting => "◐",
            Self::Error => "○",
        }
    }
}

/// Header bar colors.
pub struct HeaderBarStyle {
    /// Bar background.
    pub background: Style,
    /// Application name style.
    pub app_name: Style,
    /// Version style.
    pub version: Style,
    /// Server label style.
    pub server: Style,
    /// Connected status style.
    pub status_connected: Style,
    /// Connecting status style.
    pub status_connecting: Style,
    /// Error status style.
    pub status_error: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::White).bg(Color::DarkGray),
            server: Style::default().fg(Color::Gray),
            status_connected: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            status_connecting: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red),
        }
    }
}

/// Top line: application name, version, server and connection status.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    server: Option<&'a str>,
    connection_status: ConnectionStatus,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Creates a header with default style.
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            server: None,
            connection_status: ConnectionStatus::default(),
            style: HeaderBarStyle::default(),
        }
    }

    /// Server description shown next to the version.
    #[must_use]
    pub const fn server(mut self, server: Option<&'a str>) -> Self {
        self.server = server;
        self
    }

    /// Sets the connection status.
    #[must_use]
    pub const fn connection_status(mut self, status: ConnectionStatus) -> Self {
        self.connection_status = status;
        self
    }

    const fn status_style(&self) -> Style {
        match self.connection_status {
            ConnectionStatus::Connected => self.style.status_connected,
            ConnectionStatus::Connecting => self.style.status_connecting,
            ConnectionStatus::Error => self.style.status_error,
        }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let mut left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::styled(format!(" v{} ", self.version), self.style.version),
        ];
        if let Some(server) = self.server {
            left_spans.push(Span::styled(format!(" {server}"), self.style.server));
        }
        let left_line = Line::from(left_spans);
        let left_width = u16::try_from(left_line.width()).unwrap_or(u16::MAX);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let status = format!(
            " {} {} ",
            self.connection_status.indicator(),
            self.connection_status.display_text()
        );
        let status_width = u16::try_from(status.width()).unwrap_or(u16::MAX);
        if status_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(status_width);
            let right_area = Rect::new(right_x, area.y, status_width, 1);
            Paragraph::new(Span::styled(status, self.status_style())).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_connection_status_display() {
        assert_eq!(ConnectionStatus::Connected.display_text(), "CONNECTED");
        assert_eq!(ConnectionStatus::Error.display_text(), "OFFLINE");
        assert_eq!(ConnectionStatus::Connected.indicator(), "●");
    }

    #[test]
    fn test_header_renders_server_and_status() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        HeaderBar::new("inventree-tui", "0.1.6")
            .server(Some("InvenTree 0.17.1 @ http://localhost:8000"))
            .connection_status(ConnectionStatus::Connected)
            .render(area, &mut buf);

        let text = line(&buf);
        assert!(text.starts_with(" INVENTREE-TUI  v0.1.6"));
        assert!(text.contains("InvenTree 0.17.1"));
        assert!(text.trim_end().ends_with("CONNECTED"));
    }
}
