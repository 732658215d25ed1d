//! Password reset and email verification. None of these need a session.

use eventnow_shared::{ApiError, EmailRequest, MessageResponse, ResetPasswordRequest};
use serde::Deserialize;

use crate::api_client::ApiClient;
use crate::config::endpoints;

#[derive(Deserialize)]
struct TokenValidity {
    #[serde(default)]
    valid: bool,
}

impl ApiClient {
    /// Always succeeds for well-formed input so accounts cannot be enumerated.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let request = EmailRequest {
            email: email.trim().to_string(),
        };
        self.post_json::<_, serde_json::Value>(endpoints::FORGOT_PASSWORD, &request)
            .await
            .map(|_| ())
    }

    pub async fn validate_reset_token(&self, token: &str) -> Result<bool, ApiError> {
        let validity: TokenValidity = self
            .get_json(&endpoints::validate_reset_token(token))
            .await?;
        Ok(validity.valid)
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let request = ResetPasswordRequest {
            new_password: new_password.to_string(),
        };
        self.post_json(&endpoints::reset_password(token), &request)
            .await
    }

    /// Also used for "resend verification email".
    pub async fn send_verification_email(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let request = EmailRequest {
            email: email.trim().to_string(),
        };
        self.post_json(endpoints::VERIFY_EMAIL_SEND, &request).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.get_json(&endpoints::verify_email(token)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::AuthStorage;
    use crate::testing::MockTransport;

    #[tokio::test]
    async fn reset_token_is_escaped_in_path() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"valid": true}));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        assert!(api.validate_reset_token("a/b c").await.unwrap());
        assert_eq!(
            mock.last_request().unwrap().url,
            "/auth/reset-password/validate/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn invalid_token_surfaces_detail() {
        let mock = MockTransport::new();
        mock.push(400, r#"{"detail":"Invalid or expired token"}"#);
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        let err = api.reset_password("t", "Passw0rd!").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn forgot_password_accepts_no_content() {
        let mock = MockTransport::new();
        mock.push(204, "");
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.forgot_password(" sam@example.com ").await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body.as_deref(),
            Some(r#"{"email":"sam@example.com"}"#)
        );
    }
}
