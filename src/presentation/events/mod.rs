//! Application-wide key bindings, applied after the active screen
//! declined a key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::navigation::{AdminRoute, Route};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Global binding matched by a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalKey {
    Quit,
    Back,
    /// Jump to a navigation bar tab or the admin console.
    Open(Route),
}

/// Terminal key classification.
pub struct EventHandler;

impl EventHandler {
    /// Key repeat and release events are dropped; only presses act.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }

    /// Ctrl+C quits from anywhere, even while a text field has focus.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Maps a key the screen ignored. Single-letter bindings are skipped
    /// while the screen is capturing text.
    #[must_use]
    pub fn global_key(key: &KeyEvent, captures_text: bool) -> Option<GlobalKey> {
        if key.code == KeyCode::Esc {
            return Some(GlobalKey::Back);
        }
        if captures_text || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }

        match key.code {
            KeyCode::Char('q') => Some(GlobalKey::Quit),
            KeyCode::Char('a') => Some(GlobalKey::Open(Route::Admin(AdminRoute::Dashboard))),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c.to_digit(10).and_then(|d| usize::try_from(d).ok())? - 1;
                Route::TABS.get(idx).cloned().map(GlobalKey::Open)
            }
            _ => None,
        }
    }
}
