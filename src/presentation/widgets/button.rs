use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

/// Button color variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Neutral action.
    Primary,
    /// Confirming action.
    Success,
    /// Destructive action.
    Error,
}

impl ButtonVariant {
    const fn color(self) -> Color {
        match self {
            Self::Primary => Color::Blue,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// Single-line push button.
pub struct Button<'a> {
    label: &'a str,
    variant: ButtonVariant,
    focused: bool,
}

impl<'a> Button<'a> {
    /// Creates an unfocused button.
    #[must_use]
    pub const fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            focused: false,
        }
    }

    /// Sets focus state.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Width needed to draw the button.
    #[must_use]
    pub fn width(&self) -> u16 {
        u16::try_from(self.label.chars().count() + 4).unwrap_or(u16::MAX)
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.focused {
            Style::default()
                .bg(self.variant.color())
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().bg(self.variant.color()).fg(Color::White)
        };

        Paragraph::new(format!("[ {} ]", self.label))
            .alignment(Alignment::Center)
            .style(style)
            .render(area, buf);
    }
}
