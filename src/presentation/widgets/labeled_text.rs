use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A `Label: text` line.
pub struct LabeledText<'a> {
    label: &'a str,
    text: &'a str,
}

impl<'a> LabeledText<'a> {
    /// Creates a line.
    #[must_use]
    pub const fn new(label: &'a str, text: &'a str) -> Self {
        Self { label, text }
    }
}

impl Widget for LabeledText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(
                format!("{}: ", self.label),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.text, Style::default().fg(Color::White)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
