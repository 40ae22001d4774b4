//! Registration screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};

use super::auth_panel::AuthPanel;
use super::request::{Outcome, Request};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::domain::navigation::Route;
use crate::domain::validation::PasswordStrength;
use crate::presentation::widgets::{Form, FormEvent, TextInput};

pub struct RegisterScreen {
    form: Form,
    submitting: bool,
}

impl RegisterScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                ("username", TextInput::new("Username")),
                ("email", TextInput::new("Email").placeholder("you@example.com")),
                ("password", TextInput::new("Password").password()),
            ]),
            submitting: false,
        }
    }

    /// Strength of the typed password, once anything is typed.
    #[must_use]
    pub fn strength(&self) -> Option<PasswordStrength> {
        let password = self.form.value("password");
        (!password.is_empty()).then(|| PasswordStrength::classify(password))
    }
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for RegisterScreen {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.submitting {
            return KeyResult::Consumed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
            return KeyResult::Navigate(Route::Login);
        }

        match self.form.handle_key(key) {
            FormEvent::Submit => {
                self.submitting = true;
                KeyResult::Request(Request::Register {
                    username: self.form.value("username").trim().to_string(),
                    email: self.form.value("email").trim().to_string(),
                    password: self.form.value("password").to_string(),
                })
            }
            FormEvent::Edited => KeyResult::Consumed,
            FormEvent::Ignored => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        self.submitting = false;
        match outcome {
            Outcome::SignedIn(response) => {
                self.form.clear();
                KeyResult::Redirect(response.next)
            }
            _ => KeyResult::Consumed,
        }
    }

    fn fail(&mut self, error: &ActionError) {
        self.submitting = false;
        if let Some(invalid) = error.validation() {
            self.form.apply_errors(invalid.fields());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        AuthPanel {
            title: "Register",
            subtitle: "Create an account to start shopping",
            form: &self.form,
            strength: self.strength(),
            busy: self.submitting.then_some("Creating account..."),
            links: &[("Ctrl+L", "Already have an account? Login")],
        }
        .render(area, buf, ctx);
    }

    fn hints(&self) -> &'static str {
        "tab next · enter register · esc back"
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fill(screen: &mut RegisterScreen, values: [&str; 3]) {
        for (idx, value) in values.iter().enumerate() {
            for c in value.chars() {
                screen.handle_key(key(KeyCode::Char(c)));
            }
            if idx < 2 {
                screen.handle_key(key(KeyCode::Tab));
            }
        }
    }

    #[test]
    fn test_strength_meter_follows_password() {
        let mut screen = RegisterScreen::new();
        assert_eq!(screen.strength(), None);

        fill(&mut screen, ["bob", "bob@shop.io", "Abc12345!"]);

        assert_eq!(screen.strength(), Some(PasswordStrength::Strong));
    }

    #[test]
    fn test_submit_builds_register_request() {
        let mut screen = RegisterScreen::new();
        fill(&mut screen, ["bob", "bob@shop.io", "abc"]);

        let result = screen.handle_key(key(KeyCode::Enter));

        assert_eq!(
            result,
            KeyResult::Request(Request::Register {
                username: "bob".to_string(),
                email: "bob@shop.io".to_string(),
                password: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_failure_unlocks_form() {
        let mut screen = RegisterScreen::new();
        fill(&mut screen, ["bob", "bob@shop.io", "abc"]);
        screen.handle_key(key(KeyCode::Enter));

        screen.fail(&ActionError::failed("Registration failed."));

        assert_eq!(screen.handle_key(key(KeyCode::Char('x'))), KeyResult::Consumed);
        assert!(!screen.submitting);
    }
}
