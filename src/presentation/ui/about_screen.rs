//! Static about page.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::view::{KeyResult, RenderContext, View};

const KEYS: [(&str, &str); 7] = [
    ("1-5", "switch tabs"),
    ("a", "admin console (admins only)"),
    ("/", "search the store"),
    ("enter", "open the highlighted item"),
    ("esc", "go back"),
    ("q", "quit"),
    ("ctrl+c", "quit from anywhere"),
];

pub struct AboutScreen {
    api_base_url: String,
}

impl AboutScreen {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }
}

impl View for AboutScreen {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Enter => KeyResult::Back,
            _ => KeyResult::Ignored,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} {}", crate::NAME, crate::VERSION),
                ctx.theme.title_style,
            )),
            Line::from("A terminal storefront for browsing products, managing your cart and placing orders."),
            Line::from("Administrators can manage products, categories and orders from the same client."),
            Line::default(),
            Line::from(vec![
                Span::styled("API  ", ctx.theme.dimmed_style),
                Span::raw(self.api_base_url.as_str()),
            ]),
            Line::default(),
            Line::from(Span::styled("Keys", ctx.theme.title_style)),
        ];
        lines.extend(KEYS.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>8}  "), ctx.theme.title_style),
                Span::styled(*action, ctx.theme.dimmed_style),
            ])
        }));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" About "),
            )
            .render(area, buf);
    }

    fn hints(&self) -> &'static str {
        "esc back"
    }
}
