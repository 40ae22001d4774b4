//! Centered card shared by the sign-in and password screens.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::utils::centered_box;
use super::view::RenderContext;
use crate::domain::validation::PasswordStrength;
use crate::presentation::widgets::Form;

const PANEL_WIDTH: u16 = 56;

pub struct AuthPanel<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub form: &'a Form,
    /// Strength meter shown under the form.
    pub strength: Option<PasswordStrength>,
    pub busy: Option<&'a str>,
    pub links: &'a [(&'a str, &'a str)],
}

impl AuthPanel<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let links_height = u16::try_from(self.links.len()).unwrap_or(0);
        let height = self.form.height() + links_height + 7;
        let panel = centered_box(PANEL_WIDTH, height, area);
        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ctx.theme.accent))
            .title(Span::styled(format!(" {} ", self.title), ctx.theme.title_style));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let [subtitle_area, _, form_area, meter_area, status_area, links_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(self.subtitle)
            .style(ctx.theme.dimmed_style)
            .render(subtitle_area, buf);
        self.form.render(form_area, buf);

        if let Some(strength) = self.strength {
            let color = match strength {
                PasswordStrength::Weak => Color::Red,
                PasswordStrength::Medium => Color::Yellow,
                PasswordStrength::Strong => Color::Green,
            };
            Paragraph::new(Line::from(vec![
                Span::styled("Strength: ", ctx.theme.dimmed_style),
                Span::styled(strength.label(), Style::default().fg(color)),
            ]))
            .render(meter_area, buf);
        }

        if let Some(busy) = self.busy {
            Paragraph::new(Span::styled(
                busy,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(status_area, buf);
        }

        let links: Vec<Line> = self
            .links
            .iter()
            .map(|(key, label)| {
                Line::from(vec![
                    Span::styled(*key, ctx.theme.title_style),
                    Span::styled(format!(" {label}"), ctx.theme.dimmed_style),
                ])
            })
            .collect();
        Paragraph::new(links).render(links_area, buf);
    }
}
