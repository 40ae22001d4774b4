use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{
        Block, BorderType, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, StatefulWidget,
        Table, TableState, Widget,
    },
};

use super::{SECTIONS_HEIGHT, render_sections, section_key};
use crate::application::ActionError;
use crate::application::dto::ProductInput;
use crate::domain::entities::{Product, ProductId};
use crate::domain::navigation::AdminRoute;
use crate::presentation::ui::request::{Outcome, Request};
use crate::presentation::ui::utils::{centered_box, clamp_row, select_next_row, select_previous_row};
use crate::presentation::ui::view::{KeyResult, RenderContext, View};
use crate::presentation::widgets::{ConfirmAnswer, ConfirmDialog, Form, FormEvent, TextInput};

/// Open product editor; `editing` is `None` when creating.
struct Editor {
    editing: Option<ProductId>,
    form: Form,
    saving: bool,
}

impl Editor {
    fn new(product: Option<&Product>) -> Self {
        let image_label = if product.is_some() {
            "Image file (optional)"
        } else {
            "Image file"
        };
        let mut form = Form::new(vec![
            ("name", TextInput::new("Name")),
            ("description", TextInput::new("Description")),
            ("price", TextInput::new("Price").placeholder("19.99")),
            ("quantity", TextInput::new("Quantity").placeholder("10")),
            ("image", TextInput::new(image_label).placeholder("/path/to/photo.jpg")),
        ]);
        if let Some(product) = product {
            form.set_value("name", product.name.as_str());
            form.set_value("description", product.description.clone().unwrap_or_default());
            form.set_value("price", product.price.to_string());
            form.set_value("quantity", product.quantity.to_string());
        }
        Self {
            editing: product.map(|p| p.id.clone()),
            form,
            saving: false,
        }
    }

    fn input(&self) -> ProductInput {
        ProductInput {
            name: self.form.value("name").to_string(),
            description: self.form.value("description").to_string(),
            price: self.form.value("price").to_string(),
            quantity: self.form.value("quantity").to_string(),
            image: self.form.value("image").to_string(),
        }
    }

    fn request(&self) -> Request {
        match &self.editing {
            Some(id) => Request::UpdateProduct(id.clone(), self.input()),
            None => Request::CreateProduct(self.input()),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let popup = centered_box(64, self.form.height() + 4, area);
        Clear.render(popup, buf);
        let title = if self.editing.is_some() {
            " Edit product "
        } else {
            " New product "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ctx.theme.accent))
            .title(Span::styled(title, ctx.theme.title_style));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [form_area, status_area] =
            Layout::vertical([Constraint::Length(self.form.height()), Constraint::Length(1)])
                .areas(inner);
        self.form.render(form_area, buf);
        let status = if self.saving {
            Span::styled("Saving...", ctx.theme.dimmed_style)
        } else {
            Span::styled("ctrl+enter save · esc cancel", ctx.theme.dimmed_style)
        };
        Paragraph::new(status).render(status_area, buf);
    }
}

pub struct AdminProductsScreen {
    products: Vec<Product>,
    table: TableState,
    editor: Option<Editor>,
    confirm_delete: Option<(ConfirmDialog, ProductId)>,
    loading: bool,
}

impl AdminProductsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            table: TableState::default(),
            editor: None,
            confirm_delete: None,
            loading: true,
        }
    }

    fn selected(&self) -> Option<&Product> {
        self.table.selected().and_then(|idx| self.products.get(idx))
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> KeyResult {
        let Some(editor) = self.editor.as_mut() else {
            return KeyResult::Ignored;
        };
        if editor.saving {
            return KeyResult::Consumed;
        }
        if key.code == KeyCode::Esc {
            self.editor = None;
            return KeyResult::Consumed;
        }
        match editor.form.handle_key(key) {
            FormEvent::Submit => {
                editor.saving = true;
                KeyResult::Request(editor.request())
            }
            FormEvent::Edited | FormEvent::Ignored => KeyResult::Consumed,
        }
    }

    fn render_table(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Products ({}) ", self.products.len()));

        if self.products.is_empty() {
            let text = if self.loading {
                "Loading products..."
            } else {
                "No products yet. Press n to create one."
            };
            Paragraph::new(text)
                .style(ctx.theme.dimmed_style)
                .block(block)
                .render(area, buf);
            return;
        }

        let rows = self.products.iter().map(|product| {
            let stock_style = if product.in_stock() {
                ctx.theme.base_style
            } else {
                ctx.theme.error_style
            };
            Row::new(vec![
                Cell::from(product.name.as_str()),
                Cell::from(Span::styled(ctx.price(product.price), ctx.theme.price_style)),
                Cell::from(Span::styled(product.quantity.to_string(), stock_style)),
                Cell::from(if product.has_image() { "yes" } else { "-" }),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["Name", "Price", "Stock", "Image"])
                .style(ctx.theme.dimmed_style.add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(ctx.theme.selection_style)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol("▶ ");
        StatefulWidget::render(table, area, buf, &mut self.table);
    }
}

impl Default for AdminProductsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for AdminProductsScreen {
    fn load_requests(&self) -> Vec<Request> {
        vec![Request::Products]
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.editor.is_some() {
            return self.handle_editor_key(key);
        }

        if let Some((dialog, id)) = &self.confirm_delete {
            let answer = dialog.handle_key(key);
            let id = id.clone();
            if answer != ConfirmAnswer::Pending {
                self.confirm_delete = None;
            }
            return if answer == ConfirmAnswer::Yes {
                KeyResult::Request(Request::DeleteProduct(id))
            } else {
                KeyResult::Consumed
            };
        }

        if let Some(result) = section_key(AdminRoute::Products, key) {
            return result;
        }

        let len = self.products.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => select_next_row(&mut self.table, len),
            KeyCode::Up | KeyCode::Char('k') => select_previous_row(&mut self.table, len),
            KeyCode::Char('n') => self.editor = Some(Editor::new(None)),
            KeyCode::Char('e') | KeyCode::Enter => {
                let editor = self.selected().map(|product| Editor::new(Some(product)));
                if editor.is_some() {
                    self.editor = editor;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let prompt = self.selected().map(|product| {
                    (
                        ConfirmDialog::new(
                            "Delete product",
                            format!("Delete \"{}\"? This cannot be undone.", product.name),
                        ),
                        product.id.clone(),
                    )
                });
                if prompt.is_some() {
                    self.confirm_delete = prompt;
                }
            }
            KeyCode::Char('r') => {
                self.loading = true;
                return KeyResult::Request(Request::Products);
            }
            _ => return KeyResult::Ignored,
        }
        KeyResult::Consumed
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        match outcome {
            Outcome::Products(products) => {
                self.loading = false;
                self.products = products;
                clamp_row(&mut self.table, self.products.len());
            }
            Outcome::Done { .. } => self.editor = None,
            _ => {}
        }
        KeyResult::Consumed
    }

    fn fail(&mut self, error: &ActionError) {
        self.loading = false;
        if let Some(editor) = self.editor.as_mut() {
            editor.saving = false;
            if let Some(invalid) = error.validation() {
                editor.form.apply_errors(invalid.fields());
            }
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [sections, body] =
            Layout::vertical([Constraint::Length(SECTIONS_HEIGHT), Constraint::Fill(1)]).areas(area);
        render_sections(AdminRoute::Products, sections, buf, ctx);
        self.render_table(body, buf, ctx);

        if let Some(editor) = &self.editor {
            editor.render(area, buf, ctx);
        }
        if let Some((dialog, _)) = &self.confirm_delete {
            dialog.render(area, buf, ctx.theme);
        }
    }

    fn hints(&self) -> &'static str {
        if self.editor.is_some() {
            "tab next field · ctrl+enter save · esc cancel"
        } else if self.confirm_delete.is_some() {
            "y confirm · n cancel"
        } else {
            "tab section · n new · e edit · d delete · r refresh"
        }
    }

    fn captures_text(&self) -> bool {
        self.editor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FieldErrors;
    use crate::domain::ValidationError;
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> AdminProductsScreen {
        let mut screen = AdminProductsScreen::new();
        screen.apply(Outcome::Products(vec![
            Product::new("p1", "Mug", Decimal::new(850, 2))
                .with_quantity(4)
                .with_description("Stoneware"),
        ]));
        screen
    }

    #[test]
    fn test_edit_prefills_form_and_submits_update() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('e')));
        assert!(screen.captures_text());

        let result = screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));

        assert_eq!(
            result,
            KeyResult::Request(Request::UpdateProduct(
                "p1".into(),
                ProductInput {
                    name: "Mug".to_string(),
                    description: "Stoneware".to_string(),
                    price: "8.50".to_string(),
                    quantity: "4".to_string(),
                    image: String::new(),
                }
            ))
        );
    }

    #[test]
    fn test_new_product_submits_create() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('n')));
        for c in "Cap".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        let result = screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));

        assert!(matches!(
            result,
            KeyResult::Request(Request::CreateProduct(ProductInput { ref name, .. })) if name == "Cap"
        ));
    }

    #[test]
    fn test_validation_errors_keep_editor_open() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('n')));
        screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));
        let mut fields = FieldErrors::new();
        fields.insert("image", "Image is required");

        screen.fail(&ActionError::Invalid(ValidationError::new(
            "Name, price, quantity and image are required",
            fields,
        )));

        let editor = screen.editor.as_ref().unwrap();
        assert!(!editor.saving);
        assert_eq!(editor.form.error("image"), Some("Image is required"));
    }

    #[test]
    fn test_done_closes_editor() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('n')));

        screen.apply(Outcome::Done {
            message: "Product created",
            reload: Some(Request::Products),
        });

        assert!(screen.editor.is_none());
    }

    #[test]
    fn test_delete_asks_first() {
        let mut screen = loaded();

        screen.handle_key(key(KeyCode::Char('d')));
        assert!(screen.confirm_delete.is_some());

        let result = screen.handle_key(key(KeyCode::Char('y')));
        assert_eq!(result, KeyResult::Request(Request::DeleteProduct("p1".into())));
    }

    #[test]
    fn test_escape_cancels_editor() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('n')));

        assert_eq!(screen.handle_key(key(KeyCode::Esc)), KeyResult::Consumed);
        assert!(screen.editor.is_none());
    }
}
