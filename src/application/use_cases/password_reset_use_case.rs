//! Forgotten-password OTP flow.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::ResetStep;
use crate::application::error::ActionError;
use crate::domain::errors::ValidationError;
use crate::domain::navigation::Route;
use crate::domain::ports::{AuthPort, PasswordReset};
use crate::domain::validation::{FieldErrors, ensure_not_weak};

pub const OTP_SENT: &str = "OTP sent to your email. Check your inbox.";
pub const OTP_SEND_FAILED: &str = "Failed to send OTP";
pub const OTP_RESENT: &str = "OTP resent. Please check your email.";
pub const OTP_RESEND_FAILED: &str = "Failed to resend OTP";
pub const PASSWORD_RESET: &str = "Password reset successfully. Redirecting to login…";
pub const PASSWORD_RESET_FAILED: &str = "Failed to reset password";

/// Requests and confirms password resets.
#[derive(Clone)]
pub struct PasswordResetUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl PasswordResetUseCase {
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Emails an OTP and moves on to the reset screen.
    ///
    /// # Errors
    /// Returns error if the email is empty or the request fails.
    pub async fn request_otp(&self, email: &str) -> Result<ResetStep, ActionError> {
        Self::require_email(email, "Please enter your email.")?;
        self.send_otp(email, OTP_SEND_FAILED).await?;
        Ok(ResetStep {
            message: OTP_SENT,
            next: Some(Route::ForgotPasswordReset {
                email: email.to_string(),
            }),
        })
    }

    /// Sends another OTP from the reset screen.
    ///
    /// # Errors
    /// Returns error if the email is empty or the request fails.
    pub async fn resend_otp(&self, email: &str) -> Result<ResetStep, ActionError> {
        Self::require_email(email, "Please enter your email to resend OTP.")?;
        self.send_otp(email, OTP_RESEND_FAILED).await?;
        Ok(ResetStep {
            message: OTP_RESENT,
            next: None,
        })
    }

    /// Sets the new password and returns to the login screen.
    ///
    /// # Errors
    /// Returns error for empty fields, a weak password, or a failed request.
    pub async fn confirm(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<ResetStep, ActionError> {
        FieldErrors::new()
            .require("email", email, "Email is required")
            .require("otp", otp, "OTP is required")
            .require("newPassword", new_password, "New password is required")
            .into_result("Please fill all fields.")?;
        ensure_not_weak(new_password)?;

        let reset = PasswordReset {
            email: email.to_string(),
            otp: otp.to_string(),
            new_password: new_password.to_string(),
        };
        self.auth_port.reset_password(&reset).await.map_err(|e| {
            warn!(error = %e, "Password reset rejected");
            ActionError::from_api(&e, PASSWORD_RESET_FAILED)
        })?;

        info!(email, "Password reset");
        Ok(ResetStep {
            message: PASSWORD_RESET,
            next: Some(Route::Login),
        })
    }

    fn require_email(email: &str, banner: &str) -> Result<(), ValidationError> {
        FieldErrors::new()
            .require("email", email, "Email is required")
            .into_result(banner)
    }

    async fn send_otp(&self, email: &str, fallback: &str) -> Result<(), ActionError> {
        self.auth_port
            .request_password_reset(email)
            .await
            .map_err(|e| {
                warn!(error = %e, "OTP request rejected");
                ActionError::from_api(&e, fallback)
            })?;
        info!(email, "OTP requested");
        Ok(())
    }
}
