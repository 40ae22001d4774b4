//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};

use super::auth_panel::AuthPanel;
use super::request::{Outcome, Request};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::domain::navigation::Route;
use crate::presentation::widgets::{Form, FormEvent, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Validating,
}

pub struct LoginScreen {
    form: Form,
    state: LoginState,
}

impl LoginScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                ("email", TextInput::new("Email").placeholder("you@example.com")),
                ("password", TextInput::new("Password").password()),
            ]),
            state: LoginState::Input,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    fn submit(&mut self) -> KeyResult {
        self.state = LoginState::Validating;
        KeyResult::Request(Request::Login {
            email: self.form.value("email").trim().to_string(),
            password: self.form.value("password").to_string(),
        })
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for LoginScreen {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.state == LoginState::Validating {
            return KeyResult::Consumed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => return KeyResult::Navigate(Route::Register),
                KeyCode::Char('f') => return KeyResult::Navigate(Route::ForgotPasswordEmail),
                _ => {}
            }
        }

        match self.form.handle_key(key) {
            FormEvent::Submit => self.submit(),
            FormEvent::Edited => KeyResult::Consumed,
            FormEvent::Ignored => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        self.state = LoginState::Input;
        match outcome {
            Outcome::SignedIn(response) => {
                self.form.clear();
                KeyResult::Redirect(response.next)
            }
            _ => KeyResult::Consumed,
        }
    }

    fn fail(&mut self, error: &ActionError) {
        self.state = LoginState::Input;
        if let Some(invalid) = error.validation() {
            self.form.apply_errors(invalid.fields());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        AuthPanel {
            title: "Login",
            subtitle: "Sign in to your Kapee account",
            form: &self.form,
            strength: None,
            busy: (self.state == LoginState::Validating).then_some("Signing in..."),
            links: &[
                ("Ctrl+R", "Don't have an account? Register"),
                ("Ctrl+F", "Forgot password?"),
            ],
        }
        .render(area, buf, ctx);
    }

    fn hints(&self) -> &'static str {
        "tab next · enter login · esc back"
    }

    fn captures_text(&self) -> bool {
        true
    }
}
