//! Forgot-password flow: request an OTP by email, then set a new password.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};

use super::auth_panel::AuthPanel;
use super::request::{Outcome, Request};
use super::view::{KeyResult, RenderContext, View};
use crate::application::ActionError;
use crate::domain::validation::PasswordStrength;
use crate::presentation::widgets::{Form, FormEvent, TextInput};

pub struct ForgotEmailScreen {
    form: Form,
    sending: bool,
}

impl ForgotEmailScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![(
                "email",
                TextInput::new("Email").placeholder("you@example.com"),
            )]),
            sending: false,
        }
    }
}

impl Default for ForgotEmailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ForgotEmailScreen {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.sending {
            return KeyResult::Consumed;
        }
        match self.form.handle_key(key) {
            FormEvent::Submit => {
                self.sending = true;
                KeyResult::Request(Request::RequestOtp {
                    email: self.form.value("email").trim().to_string(),
                })
            }
            FormEvent::Edited => KeyResult::Consumed,
            FormEvent::Ignored => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        self.sending = false;
        match outcome {
            Outcome::ResetStep(step) => step.next.map_or(KeyResult::Consumed, KeyResult::Navigate),
            _ => KeyResult::Consumed,
        }
    }

    fn fail(&mut self, error: &ActionError) {
        self.sending = false;
        if let Some(invalid) = error.validation() {
            self.form.apply_errors(invalid.fields());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        AuthPanel {
            title: "Forgot password",
            subtitle: "Enter your account email to receive an OTP.",
            form: &self.form,
            strength: None,
            busy: self.sending.then_some("Sending OTP..."),
            links: &[("Enter", "Send OTP code")],
        }
        .render(area, buf, ctx);
    }

    fn hints(&self) -> &'static str {
        "enter send otp · esc back"
    }

    fn captures_text(&self) -> bool {
        true
    }
}

pub struct ForgotResetScreen {
    form: Form,
    busy: Option<&'static str>,
}

impl ForgotResetScreen {
    /// Opens the reset form with the email from the previous step.
    #[must_use]
    pub fn new(email: &str) -> Self {
        let mut form = Form::new(vec![
            ("email", TextInput::new("Email")),
            ("otp", TextInput::new("OTP").placeholder("6-digit code")),
            ("newPassword", TextInput::new("New password").password()),
        ]);
        form.set_value("email", email);
        if !email.is_empty() {
            form.focus_next();
        }
        Self { form, busy: None }
    }

    #[must_use]
    pub fn strength(&self) -> Option<PasswordStrength> {
        let password = self.form.value("newPassword");
        (!password.is_empty()).then(|| PasswordStrength::classify(password))
    }
}

impl View for ForgotResetScreen {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.busy.is_some() {
            return KeyResult::Consumed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('o') {
            self.busy = Some("Resending…");
            return KeyResult::Request(Request::ResendOtp {
                email: self.form.value("email").trim().to_string(),
            });
        }

        match self.form.handle_key(key) {
            FormEvent::Submit => {
                self.busy = Some("Resetting password...");
                KeyResult::Request(Request::ResetPassword {
                    email: self.form.value("email").trim().to_string(),
                    otp: self.form.value("otp").trim().to_string(),
                    new_password: self.form.value("newPassword").to_string(),
                })
            }
            FormEvent::Edited => KeyResult::Consumed,
            FormEvent::Ignored => KeyResult::Ignored,
        }
    }

    fn apply(&mut self, outcome: Outcome) -> KeyResult {
        self.busy = None;
        match outcome {
            // The login screen replaces this one so "back" cannot return here.
            Outcome::ResetStep(step) => step.next.map_or(KeyResult::Consumed, KeyResult::Redirect),
            _ => KeyResult::Consumed,
        }
    }

    fn fail(&mut self, error: &ActionError) {
        self.busy = None;
        if let Some(invalid) = error.validation() {
            self.form.apply_errors(invalid.fields());
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        AuthPanel {
            title: "Reset password",
            subtitle: "Enter the OTP from your inbox and a new password.",
            form: &self.form,
            strength: self.strength(),
            busy: self.busy,
            links: &[("Ctrl+O", "Resend OTP")],
        }
        .render(area, buf, ctx);
    }

    fn hints(&self) -> &'static str {
        "tab next · enter reset · ctrl+o resend · esc back"
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ResetStep;
    use crate::domain::navigation::Route;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_email_step_moves_to_reset_screen() {
        let mut screen = ForgotEmailScreen::new();
        for c in "a@b.c".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        let request = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(
            request,
            KeyResult::Request(Request::RequestOtp {
                email: "a@b.c".to_string()
            })
        );

        let next = Route::ForgotPasswordReset {
            email: "a@b.c".to_string(),
        };
        let result = screen.apply(Outcome::ResetStep(ResetStep {
            message: "OTP sent to your email. Check your inbox.",
            next: Some(next.clone()),
        }));
        assert_eq!(result, KeyResult::Navigate(next));
    }

    #[test]
    fn test_reset_screen_prefills_email_and_focuses_otp() {
        let screen = ForgotResetScreen::new("a@b.c");

        assert_eq!(screen.form.value("email"), "a@b.c");
        assert_eq!(screen.form.focused_key(), Some("otp"));
    }

    #[test]
    fn test_resend_uses_current_email() {
        let mut screen = ForgotResetScreen::new("a@b.c");

        let result = screen.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL));

        assert_eq!(
            result,
            KeyResult::Request(Request::ResendOtp {
                email: "a@b.c".to_string()
            })
        );
    }

    #[test]
    fn test_confirmed_reset_replaces_route_with_login() {
        let mut screen = ForgotResetScreen::new("a@b.c");

        let result = screen.apply(Outcome::ResetStep(ResetStep {
            message: "Password reset successfully. Redirecting to login…",
            next: Some(Route::Login),
        }));

        assert_eq!(result, KeyResult::Redirect(Route::Login));
    }

    #[test]
    fn test_resend_keeps_screen() {
        let mut screen = ForgotResetScreen::new("a@b.c");
        screen.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL));

        let result = screen.apply(Outcome::ResetStep(ResetStep {
            message: "OTP resent. Please check your email.",
            next: None,
        }));

        assert_eq!(result, KeyResult::Consumed);
        assert!(screen.busy.is_none());
    }
}
