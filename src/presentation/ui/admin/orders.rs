use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table,
        TableState, Widget, Wrap,
    },
};

use super::{SECTIONS_HEIGHT, render_sections, section_key};
use crate::application::ActionError;
use crate::domain::entities::{Order, OrderFilter, OrderStatus};
use crate::domain::navigation::AdminRoute;
use crate::presentation::theme::Theme;
use crate::presentation::ui::request::{Outcome, Request};
use crate::presentation::ui::utils::{clamp_row, format_date, select_next_row, select_previous_row};
use crate::presentation::ui::view::{KeyResult, RenderContext, View};
use crate::presentation::widgets::TextInput;

/// Status being chosen for the selected order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusPick {
    order_id: String,
    choice: usize,
}

impl StatusPick {
    fn status(&self) -> OrderStatus {
        OrderStatus::ADMIN_CHOICES[self.choice % OrderStatus::ADMIN_CHOICES.len()].clone()
    }

    fn cycle(&mut self, forward: bool) {
        let len = OrderStatus::ADMIN_CHOICES.len();
        self.choice = if forward {
            (self.choice + 1) % len
        } else {
            (self.choice + len - 1) % len
        };
    }
}

pub struct AdminOrdersScreen {
    orders: Vec<Order>,
    filter: OrderFilter,
    search: TextInput,
    searching: bool,
    table: TableState,
    pick: Option<StatusPick>,
    updating: bool,
    loading: bool,
}

impl AdminOrdersScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            filter: OrderFilter::default(),
            search: TextInput::new("Search").placeholder("Order id, email or username"),
            searching: false,
            table: TableState::default(),
            pick: None,
            updating: false,
            loading: true,
        }
    }

    fn visible(&self) -> Vec<&Order> {
        self.filter.apply(&self.orders)
    }

    fn selected(&self) -> Option<&Order> {
        self.table
            .selected()
            .and_then(|idx| self.visible().get(idx).copied())
    }

    fn refresh_selection(&mut self) {
        let len = self.visible().len();
        clamp_row(&mut self.table, len);
    }

    fn handle_pick_key(&mut self, key: KeyEvent) -> KeyResult {
        let Some(pick) = self.pick.as_mut() else {
            return KeyResult::Ignored;
        };
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => pick.cycle(false),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => pick.cycle(true),
            KeyCode::Enter => {
                let request = Request::UpdateOrderStatus {
                    order_id: pick.order_id.clone(),
                    status: pick.status(),
                };
                self.pick = None;
                self.updating = true;
                return KeyResult::Request(request);
            }
            KeyCode::Esc => self.pick = None,
            _ => {}
        }
        KeyResult::Consumed
    }

    fn render_table(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let visible = self.filter.apply(&self.orders);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(
                " {} ({} of {}) ",
                self.filter.status_label(),
                visible.len(),
                self.orders.len()
            ));

        if visible.is_empty() {
            let text = if self.loading {
                "Loading orders..."
            } else {
                "No orders match the current filter."
            };
            Paragraph::new(text)
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let rows = visible.iter().map(|order| {
            Row::new(vec![
                Cell::from(order.id.as_str()),
                Cell::from(order.customer_label()),
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
                Constraint::Fill(1),
                Constraint::Length(17),
                Constraint::Length(6),
                Constraint::Length(12),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(vec!["Order", "Customer", "Placed", "Items", "Total", "Status"])
                .style(ctx.theme.dimmed_style.add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(ctx.theme.selection_style)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol("▶ ");
        StatefulWidget::render(table, area, buf, &mut self.table);
    }

    fn render_detail(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Order ");
        let Some(order) = self.selected() else {
            block.render(area, buf);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(order.id.as_str(), ctx.theme.title_style)),
            Line::from(order.customer_label()),
        ];
        if let Some(email) = order.user.as_ref().and_then(|u| u.email()) {
            lines.push(Line::from(Span::styled(email, ctx.theme.dimmed_style)));
        }
        lines.push(Line::default());
        for item in &order.items {
            lines.push(Line::from(format!("{} × {}", item.quantity, item.name())));
        }
        lines.push(Line::default());

        match &self.pick {
            Some(pick) => {
                let mut spans = vec![Span::styled("Set status: ", ctx.theme.dimmed_style)];
                for (idx, status) in OrderStatus::ADMIN_CHOICES.iter().enumerate() {
                    let style = if idx == pick.choice {
                        ctx.theme.selection_style
                    } else {
                        Style::default().fg(Theme::status_color(status))
                    };
                    spans.push(Span::styled(format!(" {} ", status.label()), style));
                }
                lines.push(Line::from(spans));
            }
            None if self.updating => {
                lines.push(Line::from(Span::styled("Updating status...", ctx.theme.dimmed_style)));
            }
            None => lines.push(Line::from(Span::styled(
                "s change status",
                ctx.theme.dimmed_style,
            ))),
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

impl Default for AdminOrdersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for AdminOrdersScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Orders]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.pick.is_some() {
            return self.handle_pick_key(key);
        }

        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.searching = false;
                    self.search.set_focused(false);
                }
                _ => {
                    if self.search.handle_key(key) {
                        self.filter.query = self.search.value().to_string();
                        self.refresh_selection();
                    }
                }
            }
            return KeyResult::Consumed;
        }

        if let Some(result) = section_key(AdminRoute::Orders, key) {
            return result;
        }

        let len = self.visible().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => select_next_row(&mut self.table, len),
            KeyCode::Up | KeyCode::Char('k') => select_previous_row(&mut self.table, len),
            KeyCode::Char('/') => {
                self.searching = true;
                self.search.set_focused(true);
            }
            KeyCode::Char('f') => {
                self.filter.cycle_status();
                self.refresh_selection();
            }
            KeyCode::Char('s') | KeyCode::Enter if !self.updating => {
                let pick = self.selected().map(|order| StatusPick {
                    order_id: order.id.clone(),
                    choice: OrderStatus::ADMIN_CHOICES
                        .iter()
                        .position(|s| *s == order.status)
                        .unwrap_or(0),
                });
                self.pick = pick;
            }
            KeyCode::Char('r') => {
                self.loading = true;
                return KeyResult::Request(Request::Orders);
            }
            _ => return KeyResult::Ignored,
        }
        KeyResult::Consumed
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Orders(orders) => {
                self.loading = false;
                self.orders = orders;
                self.refresh_selection();
            }
            Outcome::Done { .. } => self.updating = false,
            _ => {}
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, _error: &ActionError) {
        self.loading = false;
        self.updating = false;
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [sections, search, body] = Layout::vertical([
            Constraint::Length(SECTIONS_HEIGHT),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        render_sections(AdminRoute::Orders, sections, buf, ctx);
        self.search.render(search, buf);

        let [table, detail] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(body);
        self.render_table(table, buf, ctx);
        self.render_detail(detail, buf, ctx);
    }

    fn hints(&self) -> &'static str {
        if self.pick.is_some() {
            "←→ choose status · enter apply · esc cancel"
        } else if self.searching {
            "type to search · enter done"
        } else {
            "tab section · / search · f status filter · s change status · r refresh"
        }
    }

    fn captures_text(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OrderCustomer;
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn order(id: &str, email: &str, status: OrderStatus, day: u32) -> Order {
        Order {
            id: id.to_string(),
            user: Some(OrderCustomer::Profile {
                email: email.to_string(),
                username: None,
            }),
            items: Vec::new(),
            status,
            total: Decimal::ONE,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).single(),
        }
    }

    fn loaded() -> AdminOrdersScreen {
        let mut screen = AdminOrdersScreen::new();
        screen.apply(Outcome::Orders(vec![
            order("o1", "ann@shop.io", OrderStatus::Pending, 1),
            order("o2", "bob@shop.io", OrderStatus::Shipped, 3),
            order("o3", "ann@shop.io", OrderStatus::Delivered, 2),
        ]));
        screen
    }

    #[test]
    fn test_newest_order_selected_first() {
        let screen = loaded();
        assert_eq!(screen.selected().map(|o| o.id.as_str()), Some("o2"));
    }

    #[test]
    fn test_search_and_status_filter() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('/')));
        for c in "ann".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        screen.handle_key(key(KeyCode::Enter));
        let ids: Vec<&str> = screen.visible().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o3", "o1"]);

        screen.handle_key(key(KeyCode::Char('f')));
        let ids: Vec<&str> = screen.visible().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o1"]);
    }

    #[test]
    fn test_status_change_starts_at_current_status() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            screen.pick.as_ref().map(StatusPick::status),
            Some(OrderStatus::Shipped)
        );

        screen.handle_key(key(KeyCode::Right));
        let result = screen.handle_key(key(KeyCode::Enter));

        assert_eq!(
            result,
            KeyResult::Request(Request::UpdateOrderStatus {
                order_id: "o2".to_string(),
                status: OrderStatus::Delivered,
            })
        );
        assert!(screen.pick.is_none());
    }

    #[test]
    fn test_status_choices_wrap() {
        let mut pick = StatusPick {
            order_id: "o1".to_string(),
            choice: 0,
        };

        pick.cycle(false);

        assert_eq!(pick.status(), OrderStatus::Cancelled);
    }
}
