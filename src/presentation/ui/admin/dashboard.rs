use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Widget},
};

use super::{SECTIONS_HEIGHT, render_sections, section_key};
use crate::application::ActionError;
use crate::application::dto::DashboardStats;
use crate::domain::navigation::{AdminRoute, Route};
use crate::presentation::theme::Theme;
use crate::presentation::ui::request::{Outcome, Request};
use crate::presentation::ui::utils::format_date;
use crate::presentation::ui::view::{KeyResult, RenderContext, View};
use crate::presentation::widgets::{ConfirmAnswer, ConfirmDialog};

pub struct AdminDashboardScreen {
    stats: Option<DashboardStats>,
    error: Option<String>,
    confirm_logout: Option<ConfirmDialog>,
}

impl AdminDashboardScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stats: None,
            error: None,
            confirm_logout: None,
        }
    }

    fn render_cards(stats: &DashboardStats, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let cards = [
            ("Products", stats.products.to_string()),
            ("Orders", stats.orders.to_string()),
            ("Categories", stats.categories.to_string()),
            ("Pending", stats.pending_orders.to_string()),
            ("Revenue", ctx.price(stats.revenue)),
        ];
        let areas = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);
        for ((label, value), card) in cards.into_iter().zip(areas.iter()) {
            Paragraph::new(vec![
                Line::from(Span::styled(label, ctx.theme.dimmed_style)),
                Line::from(Span::styled(value, ctx.theme.title_style)),
            ])
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .render(*card, buf);
        }
    }

    fn render_recent(stats: &DashboardStats, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Recent orders ");

        if stats.recent_orders.is_empty() {
            Paragraph::new("No orders yet.")
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let rows = stats.recent_orders.iter().map(|order| {
            Row::new(vec![
                Cell::from(order.id.as_str()),
                Cell::from(order.customer_label()),
                Cell::from(format_date(order.created_at.as_ref())),
                Cell::from(Span::styled(ctx.price(order.total), ctx.theme.price_style)),
                Cell::from(Span::styled(
                    order.status.label(),
                    Style::default().fg(Theme::status_color(&order.status)),
                )),
            ])
        });
        Widget::render(
            Table::new(
                rows,
                [
                    Constraint::Fill(1),
                    Constraint::Fill(1),
                    Constraint::Length(17),
                    Constraint::Length(12),
                    Constraint::Length(11),
                ],
            )
            .header(
                Row::new(vec!["Order", "Customer", "Placed", "Total", "Status"])
                    .style(ctx.theme.dimmed_style.add_modifier(Modifier::BOLD)),
            )
            .block(block),
            area,
            buf,
        );
    }
}

impl Default for AdminDashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for AdminDashboardScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Dashboard]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if let Some(dialog) = &self.confirm_logout {
            let answer = dialog.handle_key(key);
            if answer != ConfirmAnswer::Pending {
                self.confirm_logout = None;
            }
            return if answer == ConfirmAnswer::Yes {
                KeyResult::Logout
            } else {
                KeyResult::Consumed
            };
        }

        if let Some(result) = section_key(AdminRoute::Dashboard, key) {
            return result;
        }

        match key.code {
            KeyCode::Char('r') => KeyResult::Request(Request::Dashboard),
            KeyCode::Char('p') => KeyResult::Redirect(Route::Admin(AdminRoute::Products)),
            KeyCode::Char('o') => KeyResult::Redirect(Route::Admin(AdminRoute::Orders)),
            KeyCode::Char('g') => KeyResult::Redirect(Route::Admin(AdminRoute::Categories)),
            KeyCode::Char('L') => {
                self.confirm_logout = Some(ConfirmDialog::new(
                    "Logout",
                    "Are you sure you want to log out?",
                ));
                KeyResult::Consumed
            }
            _ => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        if let Outcome::Dashboard(stats) = outcome {
            self.stats = Some(stats);
            self.error = None;
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, error: &ActionError) {
        self.error = Some(error.message().to_string());
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [sections, cards, recent] = Layout::vertical([
            Constraint::Length(SECTIONS_HEIGHT),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);
        render_sections(AdminRoute::Dashboard, sections, buf, ctx);

        match (&self.stats, &self.error) {
            (Some(stats), _) => {
                Self::render_cards(stats, cards, buf, ctx);
                Self::render_recent(stats, recent, buf, ctx);
            }
            (None, Some(error)) => {
                Paragraph::new(error.as_str())
                    .style(ctx.theme.error_style)
                    .render(cards, buf);
            }
            (None, None) => {
                Paragraph::new("Loading dashboard...")
                    .style(ctx.theme.dimmed_style)
                    .render(cards, buf);
            }
        }

        if let Some(dialog) = &self.confirm_logout {
            dialog.render(area, buf, ctx.theme);
        }
    }

    fn hints(&self) -> &'static str {
        if self.confirm_logout.is_some() {
            "y confirm · n cancel"
        } else {
            "tab section · p products · g categories · o orders · r refresh · L logout"
        }
    }
}
