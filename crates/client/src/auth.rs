//! `/api/auth/*` bindings.

use log::warn;

use tunicoin_core::auth::{
    validate_email, validate_password, validate_two_factor_code, Credentials, EmailTokenRequest,
    MessageResponse, PasswordReset, PasswordResetRequest, TokenPair, TwoFactorCode,
    TwoFactorSetup, User,
};

use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    /// Creates an account and starts a session with the issued tokens.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<TokenPair> {
        validate_email(email)?;
        validate_password(password)?;

        let mut body = serde_json::json!({
            "email": email.trim(),
            "password": password,
        });
        if let Some(name) = full_name.map(str::trim).filter(|n| !n.is_empty()) {
            body["full_name"] = serde_json::Value::String(name.to_string());
        }

        let tokens: TokenPair = self.post("/api/auth/signup", &body).await?;
        self.session().begin(&tokens)?;
        Ok(tokens)
    }

    /// Exchanges credentials for a token pair and starts a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let tokens: TokenPair = self.post("/api/auth/login", &credentials).await?;
        self.session().begin(&tokens)?;
        Ok(tokens)
    }

    /// Ends the session. Local tokens are cleared even if the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let server = self
            .post_empty::<serde_json::Value>("/api/auth/logout")
            .await;
        if let Err(ref err) = server {
            warn!("[ApiClient] Logout request failed: {}", err);
        }
        self.session().end()?;
        Ok(())
    }

    pub async fn me(&self) -> Result<User> {
        self.get("/api/auth/me").await
    }

    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse> {
        self.post(
            "/api/auth/verify-email",
            &EmailTokenRequest {
                token: token.to_string(),
            },
        )
        .await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse> {
        validate_email(email)?;
        self.post(
            "/api/auth/reset-password-request",
            &PasswordResetRequest {
                email: email.trim().to_string(),
            },
        )
        .await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<MessageResponse> {
        validate_password(new_password)?;
        self.post(
            "/api/auth/reset-password",
            &PasswordReset {
                token: token.to_string(),
                new_password: new_password.to_string(),
            },
        )
        .await
    }

    /// Starts 2FA enrolment; the code is confirmed with [`ApiClient::verify_2fa`].
    pub async fn enable_2fa(&self) -> Result<TwoFactorSetup> {
        self.post_empty("/api/auth/2fa/enable").await
    }

    pub async fn verify_2fa(&self, code: &str) -> Result<MessageResponse> {
        validate_two_factor_code(code)?;
        self.post(
            "/api/auth/2fa/verify",
            &TwoFactorCode {
                code: code.trim().to_string(),
            },
        )
        .await
    }

    pub async fn disable_2fa(&self, code: &str) -> Result<MessageResponse> {
        validate_two_factor_code(code)?;
        self.post(
            "/api/auth/2fa/disable",
            &TwoFactorCode {
                code: code.trim().to_string(),
            },
        )
        .await
    }
}
