//! Category browser: sidebar of category names, products on the right.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{
        Block, BorderType, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph,
        StatefulWidget, Widget,
    },
};

use super::catalog_screen::product_item;
use super::request::{Outcome, Request};
use super::utils::{clamp_selection, select_next, select_previous};
use super::view::{KeyResult, RenderContext, View};
use crate::domain::entities::{Product, SIDEBAR_CATEGORIES, merge_with_sidebar};
use crate::domain::navigation::Route;
use crate::infrastructure::FuzzySearcher;

/// Sidebar entry that lists the whole catalog.
const RECOMMEND: &str = "Recommend";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Sidebar,
    Products,
}

pub struct CategoryScreen {
    names: Vec<String>,
    sidebar: ListState,
    products: Vec<Product>,
    visible: Vec<usize>,
    list: ListState,
    pane: Pane,
    searcher: FuzzySearcher,
}

impl CategoryScreen {
    #[must_use]
    pub fn new(searcher: FuzzySearcher) -> Self {
        Self {
            names: SIDEBAR_CATEGORIES.iter().map(ToString::to_string).collect(),
            sidebar: ListState::default().with_selected(Some(0)),
            products: Vec::new(),
            visible: Vec::new(),
            list: ListState::default(),
            pane: Pane::Sidebar,
            searcher,
        }
    }

    fn selected_name(&self) -> &str {
        self.sidebar
            .selected()
            .and_then(|idx| self.names.get(idx))
            .map_or(RECOMMEND, String::as_str)
    }

    fn refilter(&mut self) {
        let name = self.selected_name().to_string();
        self.visible = if name == RECOMMEND {
            (0..self.products.len()).collect()
        } else {
            self.searcher.filter_products(&self.products, &name)
        };
        clamp_selection(&mut self.list, self.visible.len());
    }

    fn move_selection(&mut self, down: bool) {
        match self.pane {
            Pane::Sidebar => {
                if down {
                    select_next(&mut self.sidebar, self.names.len());
                } else {
                    select_previous(&mut self.sidebar, self.names.len());
                }
                self.refilter();
            }
            Pane::Products => {
                if down {
                    select_next(&mut self.list, self.visible.len());
                } else {
                    select_previous(&mut self.list, self.visible.len());
                }
            }
        }
    }
}

impl View for CategoryScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Categories, Request::Products]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab if !self.visible.is_empty() => {
                self.pane = Pane::Products;
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.pane = Pane::Sidebar,
            KeyCode::Enter => match self.pane {
                Pane::Sidebar if !self.visible.is_empty() => self.pane = Pane::Products,
                Pane::Sidebar => {}
                Pane::Products => {
                    return self
                        .list
                        .selected()
                        .and_then(|idx| self.visible.get(idx))
                        .and_then(|idx| self.products.get(*idx))
                        .map_or(KeyResult::Consumed, |product| {
                            KeyResult::Navigate(Route::ProductDetail(product.id.clone()))
                        });
                }
            },
            _ => return KeyResult::Ignored,
        }
        KeyResult::Consumed
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Categories(categories) => {
                let current = self.selected_name().to_string();
                self.names = merge_with_sidebar(&categories);
                let idx = self.names.iter().position(|n| *n == current).unwrap_or(0);
                self.sidebar.select(Some(idx));
                self.refilter();
            }
            Outcome::Products(products) => {
                self.products = products;
                self.refilter();
            }
            _ => {}
        }
        KeyResult::Consumed
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)]).areas(area);

        let focus_style = |pane: Pane| {
            if self.pane == pane {
                Style::default().fg(ctx.theme.accent)
            } else {
                ctx.theme.dimmed_style
            }
        };

        let sidebar = List::new(self.names.iter().map(|n| ListItem::new(n.as_str())))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(focus_style(Pane::Sidebar))
                    .title(" Categories "),
            )
            .highlight_style(ctx.theme.selection_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▌");
        StatefulWidget::render(sidebar, sidebar_area, buf, &mut self.sidebar);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(focus_style(Pane::Products))
            .title(Span::styled(
                format!(" {} ", self.selected_name()),
                ctx.theme.title_style,
            ));

        if self.visible.is_empty() {
            Paragraph::new("Content coming soon...")
                .alignment(Alignment::Center)
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(content_area, buf);
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
        StatefulWidget::render(list, content_area, buf, &mut self.list);
    }

    fn hints(&self) -> &'static str {
        match self.pane {
            Pane::Sidebar => "↑↓ category · → products",
            Pane::Products => "↑↓ select · enter open · ← categories",
        }
    }
}
