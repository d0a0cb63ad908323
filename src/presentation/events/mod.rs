//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::presentation::ui::TabId;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Keys handled by the app regardless of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    /// Exit the application.
    Quit,
    /// Jump to a tab.
    SwitchTab(TabId),
    /// Move to the next tab.
    NextTab,
    /// Move to the previous tab.
    PreviousTab,
}

/// Terminal key classification.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key should be processed at all.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release
    }

    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'q'))
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Classifies application-wide keys.
    #[must_use]
    pub fn global_key(key: &KeyEvent) -> Option<GlobalKey> {
        if Self::is_quit_event(key) {
            return Some(GlobalKey::Quit);
        }

        match key.code {
            KeyCode::F(n @ 1..=3) => TabId::from_index(usize::from(n) - 1).map(GlobalKey::SwitchTab),
            KeyCode::Char(c @ '1'..='3') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                TabId::from_index(index - 1).map(GlobalKey::SwitchTab)
            }
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(GlobalKey::NextTab)
            }
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(GlobalKey::PreviousTab)
            }
            _ => None,
        }
    }
}
