//! Vertical stack of labelled inputs with focus cycling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::TextInput;
use crate::domain::validation::FieldErrors;

/// Height of one bordered input row.
pub const FIELD_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A field changed or focus moved.
    Edited,
    /// Enter on the last field.
    Submit,
    /// The form did not use the key.
    Ignored,
}

/// Fields keyed by the names used in validation errors.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<(&'static str, TextInput)>,
    focus: usize,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<(&'static str, TextInput)>) -> Self {
        let mut form = Self { fields, focus: 0 };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        for (idx, (_, input)) in self.fields.iter_mut().enumerate() {
            input.set_focused(idx == self.focus);
        }
    }

    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, input)| input.value())
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some((_, input)) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            input.set_value(value);
        }
    }

    pub fn clear(&mut self) {
        for (_, input) in &mut self.fields {
            input.clear();
            input.set_error(None);
        }
        self.focus = 0;
        self.sync_focus();
    }

    /// Marks every field named in `errors` and clears the others.
    pub fn apply_errors(&mut self, errors: &FieldErrors) {
        for (key, input) in &mut self.fields {
            input.set_error(errors.get(*key).map(ToString::to_string));
        }
    }

    #[must_use]
    pub fn error(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, input)| input.error())
    }

    #[must_use]
    pub const fn focused_index(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn focused_key(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|(k, _)| *k)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
            self.sync_focus();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self
                .focus
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
            self.sync_focus();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Height needed to render every field.
    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(FIELD_HEIGHT)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormEvent::Edited
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                FormEvent::Edited
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => FormEvent::Submit,
            KeyCode::Enter => {
                if self.focus + 1 >= self.fields.len() {
                    FormEvent::Submit
                } else {
                    self.focus_next();
                    FormEvent::Edited
                }
            }
            _ => match self.fields.get_mut(self.focus) {
                Some((_, input)) => {
                    if input.handle_key(key) {
                        FormEvent::Edited
                    } else {
                        FormEvent::Ignored
                    }
                }
                None => FormEvent::Ignored,
            },
        }
    }
}

impl Widget for &Form {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical(
            self.fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(area);

        for ((_, input), row) in self.fields.iter().zip(rows.iter()) {
            input.render(*row, buf);
        }
    }
}
