//! Home and Shopping screens: the product grid, with live search on Shopping.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph,
        StatefulWidget, Widget, Wrap,
    },
};

use super::request::{Outcome, Request};
use super::utils::{clamp_selection, select_next, select_previous};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::domain::entities::Product;
use crate::domain::navigation::Route;
use crate::infrastructure::FuzzySearcher;
use crate::presentation::widgets::TextInput;

const FEATURED_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    /// Hero banner and the first products of the catalog.
    Home,
    /// Full catalog with a search bar.
    Shopping,
}

pub struct CatalogScreen {
    mode: CatalogMode,
    products: Vec<Product>,
    /// Indices into `products` after filtering.
    visible: Vec<usize>,
    list: ListState,
    search: TextInput,
    searching: bool,
    searcher: FuzzySearcher,
    loading: bool,
}

impl CatalogScreen {
    #[must_use]
    pub fn new(mode: CatalogMode, searcher: FuzzySearcher) -> Self {
        Self {
            mode,
            products: Vec::new(),
            visible: Vec::new(),
            list: ListState::default(),
            search: TextInput::new("Search").placeholder("Type to filter, enter to search the store"),
            searching: false,
            searcher,
            loading: true,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> CatalogMode {
        self.mode
    }

    fn refilter(&mut self) {
        self.visible = match self.mode {
            CatalogMode::Home => (0..self.products.len().min(FEATURED_COUNT)).collect(),
            CatalogMode::Shopping => self
                .searcher
                .filter_products(&self.products, self.search.value()),
        };
        clamp_selection(&mut self.list, self.visible.len());
    }

    fn selected(&self) -> Option<&Product> {
        self.list
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .and_then(|idx| self.products.get(*idx))
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Esc => {
                self.searching = false;
                self.search.set_focused(false);
                KeyResult::Consumed
            }
            KeyCode::Enter => {
                self.searching = false;
                self.search.set_focused(false);
                self.loading = true;
                let query = self.search.value().trim().to_string();
                if query.is_empty() {
                    KeyResult::Request(Request::Products)
                } else {
                    KeyResult::Request(Request::Search(query))
                }
            }
            KeyCode::Down => {
                select_next(&mut self.list, self.visible.len());
                KeyResult::Consumed
            }
            KeyCode::Up => {
                select_previous(&mut self.list, self.visible.len());
                KeyResult::Consumed
            }
            _ => {
                if self.search.handle_key(key) {
                    self.refilter();
                }
                KeyResult::Consumed
            }
        }
    }

    fn render_list(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>, title: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(format!(" {title} "), ctx.theme.title_style));

        if self.visible.is_empty() {
            let message = if self.loading {
                "Loading products..."
            } else if self.products.is_empty() {
                "No products available."
            } else {
                "No products match your search."
            };
            Paragraph::new(message)
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|idx| self.products.get(*idx))
            .map(|product| product_item(product, ctx))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(ctx.theme.selection_style)
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);
        StatefulWidget::render(list, area, buf, &mut self.list);
    }
}

/// One product row: name, price and stock.
pub(super) fn product_item<'a>(product: &'a Product, ctx: &RenderContext<'_>) -> ListItem<'a> {
    let stock = if product.in_stock() {
        Span::styled(format!("  {} in stock", product.quantity), ctx.theme.dimmed_style)
    } else {
        Span::styled("  out of stock", ctx.theme.error_style)
    };
    ListItem::new(Line::from(vec![
        Span::raw(product.name.as_str()),
        Span::raw("  "),
        Span::styled(ctx.price(product.price), ctx.theme.price_style),
        stock,
    ]))
}

/// Side panel describing the highlighted product.
pub(super) fn render_preview(product: Option<&Product>, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Details ");

    let Some(product) = product else {
        block.render(area, buf);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(product.name.as_str(), ctx.theme.title_style)),
        Line::from(Span::styled(ctx.price(product.price), ctx.theme.price_style)),
        Line::default(),
    ];
    if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(description));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "enter to open",
        ctx.theme.dimmed_style.add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

impl View for CatalogScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Products]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.searching {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Char('/') => match self.mode {
                CatalogMode::Shopping => {
                    self.searching = true;
                    self.search.set_focused(true);
                    KeyResult::Consumed
                }
                CatalogMode::Home => KeyResult::Navigate(Route::Shopping),
            },
            KeyCode::Down | KeyCode::Char('j') => {
                select_next(&mut self.list, self.visible.len());
                KeyResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                select_previous(&mut self.list, self.visible.len());
                KeyResult::Consumed
            }
            KeyCode::Enter => self.selected().map_or(KeyResult::Consumed, |product| {
                KeyResult::Navigate(Route::ProductDetail(product.id.clone()))
            }),
            KeyCode::Char('r') => {
                self.loading = true;
                KeyResult::Request(Request::Products)
            }
            _ => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        if let Outcome::Products(products) = outcome {
            self.products = products;
            self.loading = false;
            self.refilter();
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, _error: &ActionError) {
        self.loading = false;
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        match self.mode {
            CatalogMode::Home => {
                let [hero, body] =
                    Layout::vertical([Constraint::Length(5), Constraint::Fill(1)]).areas(area);
                let greeting = ctx.user.map_or_else(
                    || "Welcome to Kapee".to_string(),
                    |user| format!("Welcome back, {}", user.display_name()),
                );
                Paragraph::new(vec![
                    Line::from(Span::styled(greeting, ctx.theme.title_style)),
                    Line::from(Span::styled(
                        "New arrivals every week. Press / to browse the whole store.",
                        ctx.theme.dimmed_style,
                    )),
                ])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .border_style(Style::default().fg(ctx.theme.accent)),
                )
                .render(hero, buf);
                self.render_list(body, buf, ctx, "Featured");
            }
            CatalogMode::Shopping => {
                let [search, body] =
                    Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
                self.search.render(search, buf);
                let [list, preview] =
                    Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                        .areas(body);
                let title = format!("Products ({})", self.visible.len());
                self.render_list(list, buf, ctx, &title);
                render_preview(self.selected(), preview, buf, ctx);
            }
        }
    }

    fn hints(&self) -> &'static str {
        match (self.mode, self.searching) {
            (_, true) => "type to filter · enter search · esc done",
            (CatalogMode::Shopping, false) => "/ search · ↑↓ select · enter open · r refresh",
            (CatalogMode::Home, false) => "↑↓ select · enter open · / shop · r refresh",
        }
    }

    fn captures_text(&self) -> bool {
        self.searching
    }
}
