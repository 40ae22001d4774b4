//! Admin console screens. Every screen here is mounted only after the
//! admin guard has let the current session through.

mod categories;
mod dashboard;
mod orders;
mod products;

pub use categories::AdminCategoriesScreen;
pub use dashboard::AdminDashboardScreen;
pub use orders::AdminOrdersScreen;
pub use products::AdminProductsScreen;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Tabs, Widget},
};

use super::view::{KeyResult, RenderContext};
use crate::domain::navigation::{AdminRoute, Route};

/// Tab and shift+tab cycle through the admin sections.
pub(super) fn section_key(current: AdminRoute, key: KeyEvent) -> Option<KeyResult> {
    let sections = AdminRoute::ALL;
    let idx = sections.iter().position(|s| *s == current).unwrap_or(0);
    let next = match key.code {
        KeyCode::Tab => sections[(idx + 1) % sections.len()],
        KeyCode::BackTab => sections[(idx + sections.len() - 1) % sections.len()],
        _ => return None,
    };
    Some(KeyResult::Redirect(Route::Admin(next)))
}

/// Section header shared by the admin screens.
pub(super) fn render_sections(current: AdminRoute, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
    let titles = AdminRoute::ALL.iter().map(|s| Line::from(format!(" {} ", s.title())));
    let selected = AdminRoute::ALL.iter().position(|s| *s == current);
    Tabs::new(titles)
        .select(selected)
        .style(ctx.theme.dimmed_style)
        .highlight_style(ctx.theme.selection_style)
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(ctx.theme.accent))
                .title(" Admin "),
        )
        .render(area, buf);
}

/// Height of the section header.
pub(super) const SECTIONS_HEIGHT: u16 = 2;
