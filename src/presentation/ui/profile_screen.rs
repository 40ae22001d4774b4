//! Profile screen: account details, order counters and order history.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table,
        TableState, Widget,
    },
};

use super::request::{Outcome, Request};
use super::utils::{clamp_row, format_date, select_next_row, select_previous_row};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::application::dto::{OrderSummary, ProfileView};
use crate::domain::entities::User;
use crate::domain::navigation::Route;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ConfirmAnswer, ConfirmDialog};

pub struct ProfileScreen {
    signed_in: bool,
    profile: Option<ProfileView>,
    error: Option<String>,
    orders: TableState,
    confirm_logout: Option<ConfirmDialog>,
}

impl ProfileScreen {
    #[must_use]
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in,
            profile: None,
            error: None,
            orders: TableState::default(),
            confirm_logout: None,
        }
    }

    fn order_count(&self) -> usize {
        self.profile.as_ref().map_or(0, |p| p.orders.len())
    }

    fn render_signed_out(area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled("You are not logged in.", ctx.theme.title_style)),
            Line::default(),
            Line::from(vec![
                Span::styled("l", ctx.theme.title_style),
                Span::styled(" login   ", ctx.theme.dimmed_style),
                Span::styled("i", ctx.theme.title_style),
                Span::styled(" about", ctx.theme.dimmed_style),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .render(area, buf);
    }

    fn render_account(user: Option<&User>, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let lines = user.map_or_else(Vec::new, |user| {
            vec![
                Line::from(Span::styled(user.display_name(), ctx.theme.title_style)),
                Line::from(Span::styled(user.email(), ctx.theme.dimmed_style)),
                Line::from(vec![
                    Span::styled("Role: ", ctx.theme.dimmed_style),
                    Span::raw(user.role().as_str()),
                ]),
            ]
        });
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Account "),
            )
            .render(area, buf);
    }

    fn render_summary(summary: &OrderSummary, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        use crate::domain::entities::OrderStatus;

        let counters = [
            (OrderStatus::Pending, summary.pending),
            (OrderStatus::Processing, summary.processing),
            (OrderStatus::Shipped, summary.shipped),
            (OrderStatus::Delivered, summary.delivered),
            (OrderStatus::Cancelled, summary.cancelled),
        ];
        let mut spans = Vec::with_capacity(counters.len() * 2);
        for (status, count) in counters {
            spans.push(Span::styled(
                format!(" {count} "),
                Style::default()
                    .fg(Theme::status_color(&status))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!("{}   ", status.label()), ctx.theme.dimmed_style));
        }
        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" My Orders "),
            )
            .render(area, buf);
    }

    fn render_orders(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Order history ");

        let Some(profile) = &self.profile else {
            let (text, style) = self.error.as_deref().map_or(
                ("Loading orders...", ctx.theme.dimmed_style),
                |message| (message, ctx.theme.error_style),
            );
            Paragraph::new(text).style(style).block(block).render(area, buf);
            return;
        };

        if profile.orders.is_empty() {
            Paragraph::new("No orders yet.")
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let rows = profile.orders.iter().map(|order| {
            Row::new(vec![
                Cell::from(order.id.as_str()),
                Cell::from(format_date(order.created_at.as_ref())),
                Cell::from(order.item_count().to_string()),
                Cell::from(Span::styled(ctx.price(order.total), ctx.theme.price_style)),
                Cell::from(Span::styled(
                    order.status.label(),
                    Style::default().fg(Theme::status_color(&order.status)),
                )),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(17),
                Constraint::Length(6),
                Constraint::Length(12),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(vec!["Order", "Placed", "Items", "Total", "Status"])
                .style(ctx.theme.dimmed_style.add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(ctx.theme.selection_style)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol("▶ ");
        StatefulWidget::render(table, area, buf, &mut self.orders);
    }
}

impl View for ProfileScreen {
    fn load_requests(&self) -> Vec<Request> {
        if self.signed_in {
            vec![Request::Profile]
        } else {
            Vec::new()
        }
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

        match key.code {
            KeyCode::Char('i') => KeyResult::Navigate(Route::About),
            KeyCode::Char('l') if !self.signed_in => KeyResult::Navigate(Route::Login),
            KeyCode::Char('L') if self.signed_in => {
                self.confirm_logout = Some(ConfirmDialog::new(
                    "Logout",
                    "Are you sure you want to log out?",
                ));
                KeyResult::Consumed
            }
            KeyCode::Char('r') if self.signed_in => KeyResult::Request(Request::Profile),
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.order_count();
                select_next_row(&mut self.orders, count);
                KeyResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let count = self.order_count();
                select_previous_row(&mut self.orders, count);
                KeyResult::Consumed
            }
            _ => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        if let Outcome::Profile(profile) = outcome {
            let len = profile.orders.len();
            self.profile = Some(profile);
            self.error = None;
            clamp_row(&mut self.orders, len);
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, error: &ActionError) {
        if self.profile.is_none() {
            self.error = Some(error.message().to_string());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        if !self.signed_in {
            Self::render_signed_out(area, buf, ctx);
            return;
        }

        let [account, summary, orders] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);

        Self::render_account(ctx.user, account, buf, ctx);
        let summary_data = self
            .profile
            .as_ref()
            .map(|p| p.summary.clone())
            .unwrap_or_default();
        Self::render_summary(&summary_data, summary, buf, ctx);
        self.render_orders(orders, buf, ctx);

        if let Some(dialog) = &self.confirm_logout {
            dialog.render(area, buf, ctx.theme);
        }
    }

    fn hints(&self) -> &'static str {
        if self.confirm_logout.is_some() {
            "y confirm · n cancel"
        } else if self.signed_in {
            "↑↓ orders · r refresh · L logout · i about"
        } else {
            "l login · i about"
        }
    }
}
