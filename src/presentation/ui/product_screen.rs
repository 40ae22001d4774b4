//! Product detail screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::request::{Outcome, Request};
use super::utils::format_date;
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::domain::entities::{Product, ProductId};

enum Detail {
    Loading,
    Loaded(Product),
    Failed(String),
}

pub struct ProductScreen {
    id: ProductId,
    detail: Detail,
    adding: bool,
}

impl ProductScreen {
    #[must_use]
    pub const fn new(id: ProductId) -> Self {
        Self {
            id,
            detail: Detail::Loading,
            adding: false,
        }
    }

    const fn product(&self) -> Option<&Product> {
        match &self.detail {
            Detail::Loaded(product) => Some(product),
            _ => None,
        }
    }
}

impl View for ProductScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Product(self.id.clone())]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter if self.product().is_some() && !self.adding => {
                self.adding = true;
                KeyResult::Request(Request::AddToCart(self.id.clone()))
            }
            KeyCode::Char('o') => match self.product() {
                Some(product) if product.has_image() => KeyResult::OpenLink(product.image.clone()),
                _ => KeyResult::Consumed,
            },
            KeyCode::Char('r') => {
                self.detail = Detail::Loading;
                KeyResult::Request(Request::Product(self.id.clone()))
            }
            _ => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Product(product) => self.detail = Detail::Loaded(product),
            Outcome::Done { .. } => self.adding = false,
            _ => {}
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, error: &ActionError) {
        if self.adding {
            self.adding = false;
        } else if self.product().is_none() {
            self.detail = Detail::Failed(error.message().to_string());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ctx.theme.accent));

        let product = match &self.detail {
            Detail::Loading => {
                Paragraph::new("Loading product...")
                    .style(ctx.theme.dimmed_style)
                    .block(block)
                    .render(area, buf);
                return;
            }
            Detail::Failed(message) => {
                Paragraph::new(vec![
                    Line::from(Span::styled(message.as_str(), ctx.theme.error_style)),
                    Line::from(Span::styled("r retry · esc back", ctx.theme.dimmed_style)),
                ])
                .block(block)
                .render(area, buf);
                return;
            }
            Detail::Loaded(product) => product,
        };

        let block = block.title(Span::styled(
            format!(" {} ", product.name),
            ctx.theme.title_style,
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        let [header, description, footer] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        let stock = if product.in_stock() {
            Span::styled(
                format!("In stock ({} left)", product.quantity),
                Style::default().fg(Color::Green),
            )
        } else {
            Span::styled("Out of stock", ctx.theme.error_style)
        };
        Paragraph::new(vec![
            Line::from(Span::styled(ctx.price(product.price), ctx.theme.price_style)),
            Line::from(stock),
            Line::from(vec![
                Span::styled("Listed ", ctx.theme.dimmed_style),
                Span::raw(format_date(product.created_at.as_ref())),
            ]),
            Line::from(if product.has_image() {
                Span::styled(product.image.as_str(), ctx.theme.dimmed_style)
            } else {
                Span::styled("No image", ctx.theme.dimmed_style)
            }),
        ])
        .render(header, buf);

        let text = product
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided.");
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(description, buf);

        let action = if self.adding {
            Span::styled("Adding to cart...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("[c] Add to cart", ctx.theme.title_style)
        };
        Paragraph::new(Line::from(action)).render(footer, buf);
    }

    fn hints(&self) -> &'static str {
        "c add to cart · o open image · r reload · esc back"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> ProductScreen {
        let mut screen = ProductScreen::new("p1".into());
        screen.apply(Outcome::Product(
            Product::new("p1", "Lamp", Decimal::new(2500, 2))
                .with_quantity(2)
                .with_image("https://cdn.example/lamp.jpg"),
        ));
        screen
    }

    #[test]
    fn test_add_to_cart_needs_loaded_product() {
        let mut screen = ProductScreen::new("p1".into());
        assert_eq!(screen.handle_key(key(KeyCode::Char('c'))), KeyResult::Ignored);

        let mut screen = loaded();
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('c'))),
            KeyResult::Request(Request::AddToCart("p1".into()))
        );
    }

    #[test]
    fn test_open_image_link() {
        let mut screen = loaded();

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('o'))),
            KeyResult::OpenLink("https://cdn.example/lamp.jpg".to_string())
        );
    }

    #[test]
    fn test_load_failure_shows_message() {
        let mut screen = ProductScreen::new("p1".into());

        screen.fail(&ActionError::failed("Failed to load product"));

        assert!(matches!(&screen.detail, Detail::Failed(m) if m == "Failed to load product"));
    }

    #[test]
    fn test_add_failure_keeps_product() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('c')));

        screen.fail(&ActionError::failed("Could not add to cart"));

        assert!(screen.product().is_some());
        assert!(!screen.adding);
    }
}
