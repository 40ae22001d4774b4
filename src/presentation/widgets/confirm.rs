//! Yes/no confirmation modal.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Yes,
    No,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    title: String,
    message: String,
}

impl ConfirmDialog {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> ConfirmAnswer {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmAnswer::Yes,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => ConfirmAnswer::No,
            _ => ConfirmAnswer::Pending,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let popup = centered_rect(50, 30, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.title));

        let lines = vec![
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" confirm   ", theme.dimmed_style),
                Span::styled("n", theme.title_style),
                Span::styled(" cancel", theme.dimmed_style),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('y'), ConfirmAnswer::Yes ; "y_confirms")]
    #[test_case(KeyCode::Enter, ConfirmAnswer::Yes ; "enter_confirms")]
    #[test_case(KeyCode::Char('n'), ConfirmAnswer::No ; "n_cancels")]
    #[test_case(KeyCode::Esc, ConfirmAnswer::No ; "esc_cancels")]
    #[test_case(KeyCode::Char('x'), ConfirmAnswer::Pending ; "other_waits")]
    fn test_answers(code: KeyCode, expected: ConfirmAnswer) {
        let dialog = ConfirmDialog::new("Delete Product", "Are you sure?");

        assert_eq!(dialog.handle_key(KeyEvent::from(code)), expected);
    }
}
