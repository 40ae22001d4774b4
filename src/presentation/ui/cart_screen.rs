//! Cart screen with quantity controls, checkout and related products.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, HighlightSpacing, List, ListItem, Paragraph, Row,
        StatefulWidget, Table, TableState, Widget,
    },
};

use super::catalog_screen::product_item;
use super::request::{Outcome, Request};
use super::utils::{clamp_row, select_next_row, select_previous_row};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::application::dto::CartView;
use crate::domain::entities::CartItem;
use crate::domain::navigation::Route;
use crate::presentation::widgets::{ConfirmAnswer, ConfirmDialog};

pub struct CartScreen {
    view: Option<CartView>,
    table: TableState,
    confirm: Option<ConfirmDialog>,
    /// Requests sent and not yet answered. Quantity updates do not wait for
    /// each other; the last response to arrive replaces the items.
    pending: usize,
}

impl CartScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: None,
            table: TableState::default(),
            confirm: None,
            pending: 0,
        }
    }

    fn items(&self) -> &[CartItem] {
        self.view.as_ref().map_or(&[], |view| view.cart.items.as_slice())
    }

    fn selected_item(&self) -> Option<&CartItem> {
        self.table.selected().and_then(|idx| self.items().get(idx))
    }

    fn clamp(&mut self) {
        let len = self.items().len();
        clamp_row(&mut self.table, len);
    }

    fn item_request(&mut self, build: impl FnOnce(&CartItem) -> Request) -> KeyResult {
        match self.selected_item().map(build) {
            Some(request) => {
                self.pending += 1;
                KeyResult::Request(request)
            }
            None => KeyResult::Consumed,
        }
    }

    const fn settle(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    fn render_items(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(" My Cart ", ctx.theme.title_style));

        let Some(view) = &self.view else {
            Paragraph::new("Loading cart...")
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        };

        if view.cart.is_empty() {
            Paragraph::new(vec![
                Line::from("Your cart is empty."),
                Line::from(Span::styled(
                    "Press 3 to start shopping.",
                    ctx.theme.dimmed_style,
                )),
            ])
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
            return;
        }

        let rows = view.cart.items.iter().map(|item| {
            Row::new(vec![
                Cell::from(item.product.name.as_str()),
                Cell::from(ctx.price(item.product.price)),
                Cell::from(format!("− {} +", item.quantity)),
                Cell::from(Span::styled(
                    ctx.price(item.line_total()),
                    ctx.theme.price_style,
                )),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["Product", "Price", "Qty", "Subtotal"])
                .style(ctx.theme.dimmed_style.add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(ctx.theme.selection_style)
        .highlight_symbol("▶ ")
        .highlight_spacing(HighlightSpacing::Always);
        StatefulWidget::render(table, area, buf, &mut self.table);
    }
}

impl Default for CartScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for CartScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Cart]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if let Some(dialog) = &self.confirm {
            match dialog.handle_key(key) {
                ConfirmAnswer::Yes => {
                    self.confirm = None;
                    self.pending += 1;
                    return KeyResult::Request(Request::Checkout);
                }
                ConfirmAnswer::No => self.confirm = None,
                ConfirmAnswer::Pending => {}
            }
            return KeyResult::Consumed;
        }

        let len = self.items().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                select_next_row(&mut self.table, len);
                KeyResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                select_previous_row(&mut self.table, len);
                KeyResult::Consumed
            }
            KeyCode::Char('+' | '=') | KeyCode::Right => {
                self.item_request(|item| Request::Increment(item.clone()))
            }
            KeyCode::Char('-') | KeyCode::Left => {
                self.item_request(|item| Request::Decrement(item.clone()))
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.item_request(|item| Request::RemoveItem(item.product.id.clone()))
            }
            KeyCode::Enter => self.selected_item().map_or(KeyResult::Consumed, |item| {
                KeyResult::Navigate(Route::ProductDetail(item.product.id.clone()))
            }),
            KeyCode::Char('c') if len > 0 && self.pending == 0 => {
                let total = self.view.as_ref().map(CartView::total).unwrap_or_default();
                self.confirm = Some(ConfirmDialog::new(
                    "Checkout",
                    format!("Place an order of {len} item(s) for {total:.2}?"),
                ));
                KeyResult::Consumed
            }
            KeyCode::Char('r') => KeyResult::Request(Request::Cart),
            _ => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Cart(view) => {
                self.pending = 0;
                self.view = Some(view);
                self.clamp();
            }
            Outcome::CartItems(cart) => {
                self.settle();
                self.view.get_or_insert_with(CartView::default).cart = cart;
                self.clamp();
            }
            Outcome::Done { .. } => self.settle(),
            _ => {}
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, _error: &ActionError) {
        self.settle();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let related_height = self
            .view
            .as_ref()
            .filter(|view| !view.related.is_empty())
            .map_or(0, |view| u16::try_from(view.related.len()).unwrap_or(0) + 2);

        let [items, summary, related] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(related_height),
        ])
        .areas(area);

        self.render_items(items, buf, ctx);

        if let Some(view) = &self.view {
            let status = if self.pending > 0 {
                Span::styled("  Updating...", ctx.theme.dimmed_style)
            } else {
                Span::raw("")
            };
            Paragraph::new(Line::from(vec![
                Span::raw(format!("{} unit(s)  Total: ", view.cart.unit_count())),
                Span::styled(ctx.price(view.total()), ctx.theme.price_style),
                status,
            ]))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .render(summary, buf);

            if !view.related.is_empty() {
                let list = List::new(view.related.iter().map(|p| product_item(p, ctx))).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(" You may also like "),
                );
                Widget::render(list, related, buf);
            }
        }

        if let Some(dialog) = &self.confirm {
            dialog.render(area, buf, ctx.theme);
        }
    }

    fn hints(&self) -> &'static str {
        if self.confirm.is_some() {
            "y confirm · n cancel"
        } else {
            "↑↓ select · +/- quantity · d remove · c checkout · enter open"
        }
    }
}
