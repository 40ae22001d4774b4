//! Common interface of every screen.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};

use super::request::{Outcome, Request};
use crate::application::ActionError;
use crate::domain::entities::User;
use crate::domain::navigation::Route;
use crate::presentation::theme::Theme;

/// What a screen wants the application to do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyResult {
    /// The key was used.
    Consumed,
    /// The screen has no use for the key; global bindings apply.
    Ignored,
    Quit,
    Navigate(Route),
    /// Replace the current route instead of pushing a new one.
    Redirect(Route),
    Back,
    Logout,
    Request(Request),
    /// Open a link in the system browser.
    OpenLink(String),
}

/// Shared data every screen may render.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub currency: &'a str,
    pub user: Option<&'a User>,
}

impl RenderContext<'_> {
    #[must_use]
    pub fn price(&self, amount: rust_decimal::Decimal) -> String {
        crate::domain::entities::format_price(amount, self.currency)
    }
}

pub trait View {
    /// Requests fired when the screen is mounted.
    fn load_requests(&self) -> Vec<Request> {
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;

    /// Receives the result of a request. Screens ignore outcomes they did
    /// not ask for.
    fn apply(&mut self, _outcome: Outcome) -> KeyResult {
        KeyResult::Consumed
    }

    /// Receives a failed request, e.g. to highlight invalid fields.
    fn fail(&mut self, _error: &ActionError) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>);

    /// Key hints for the status line.
    fn hints(&self) -> &'static str;

    /// True while a text field has focus, so single-letter shortcuts are typed.
    fn captures_text(&self) -> bool {
        false
    }

    fn tick(&mut self, _elapsed: Duration) {}
}
