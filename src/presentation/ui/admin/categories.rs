use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{
        Block, BorderType, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph,
        StatefulWidget, Widget,
    },
};

use super::{SECTIONS_HEIGHT, render_sections, section_key};
use crate::application::ActionError;
use crate::domain::entities::Category;
use crate::domain::navigation::AdminRoute;
use crate::infrastructure::FuzzySearcher;
use crate::presentation::ui::request::{Outcome, Request};
use crate::presentation::ui::utils::{clamp_selection, select_next, select_previous};
use crate::presentation::ui::view::{KeyResult, RenderContext, View};
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    /// Typing a filter over the list.
    Filter,
    /// Typing the name of a new category.
    Create,
}

pub struct AdminCategoriesScreen {
    categories: Vec<Category>,
    list: ListState,
    filter: TextInput,
    name: TextInput,
    mode: Mode,
    saving: bool,
    searcher: FuzzySearcher,
}

impl AdminCategoriesScreen {
    #[must_use]
    pub fn new(searcher: FuzzySearcher) -> Self {
        Self {
            categories: Vec::new(),
            list: ListState::default(),
            filter: TextInput::new("Filter"),
            name: TextInput::new("New category").placeholder("Category name"),
            mode: Mode::Browse,
            saving: false,
            searcher,
        }
    }

    fn visible(&self) -> Vec<&Category> {
        self.searcher
            .filter_categories(&self.categories, self.filter.value())
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.filter.set_focused(mode == Mode::Filter);
        self.name.set_focused(mode == Mode::Create);
    }
}

impl View for AdminCategoriesScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::AdminCategories]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match self.mode {
            Mode::Create => {
                if self.saving {
                    return KeyResult::Consumed;
                }
                match key.code {
                    KeyCode::Esc => {
                        self.name.clear();
                        self.name.set_error(None);
                        self.set_mode(Mode::Browse);
                    }
                    KeyCode::Enter => {
                        self.saving = true;
                        return KeyResult::Request(Request::CreateCategory(
                            self.name.value().to_string(),
                        ));
                    }
                    _ => {
                        self.name.handle_key(key);
                    }
                }
                KeyResult::Consumed
            }
            Mode::Filter => {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => self.set_mode(Mode::Browse),
                    _ => {
                        if self.filter.handle_key(key) {
                            let len = self.visible().len();
                            clamp_selection(&mut self.list, len);
                        }
                    }
                }
                KeyResult::Consumed
            }
            Mode::Browse => {
                if let Some(result) = section_key(AdminRoute::Categories, key) {
                    return result;
                }
                let len = self.visible().len();
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => select_next(&mut self.list, len),
                    KeyCode::Up | KeyCode::Char('k') => select_previous(&mut self.list, len),
                    KeyCode::Char('n') => self.set_mode(Mode::Create),
                    KeyCode::Char('/') => self.set_mode(Mode::Filter),
                    KeyCode::Char('r') => return KeyResult::Request(Request::AdminCategories),
                    _ => return KeyResult::Ignored,
                }
                KeyResult::Consumed
            }
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Categories(categories) => {
                self.categories = categories;
                let len = self.visible().len();
                clamp_selection(&mut self.list, len);
            }
            Outcome::Done { .. } if self.mode == Mode::Create => {
                self.saving = false;
                self.name.clear();
                self.set_mode(Mode::Browse);
            }
            _ => {}
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, error: &ActionError) {
        self.saving = false;
        if let Some(message) = error.validation().and_then(|v| v.fields().get("name")) {
            self.name.set_error(Some(message.to_string()));
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let input_height = if self.mode == Mode::Browse { 0 } else { 3 };
        let [sections, input, body] = Layout::vertical([
            Constraint::Length(SECTIONS_HEIGHT),
            Constraint::Length(input_height),
            Constraint::Fill(1),
        ])
        .areas(area);
        render_sections(AdminRoute::Categories, sections, buf, ctx);

        match self.mode {
            Mode::Create => self.name.render(input, buf),
            Mode::Filter => self.filter.render(input, buf),
            Mode::Browse => {}
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Categories ({}) ", self.categories.len()));

        let names: Vec<ListItem> = self
            .searcher
            .filter_categories(&self.categories, self.filter.value())
            .into_iter()
            .map(|c| ListItem::new(c.name.as_str()))
            .collect();
        if names.is_empty() {
            Paragraph::new("No categories.")
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(body, buf);
            return;
        }

        let list = List::new(names)
            .block(block)
            .highlight_style(ctx.theme.selection_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▶ ");
        StatefulWidget::render(list, body, buf, &mut self.list);
    }

    fn hints(&self) -> &'static str {
        match self.mode {
            Mode::Browse => "tab section · n new · / filter · r refresh",
            Mode::Filter => "type to filter · enter done",
            Mode::Create => "enter create · esc cancel",
        }
    }

    fn captures_text(&self) -> bool {
        self.mode != Mode::Browse
    }
}
