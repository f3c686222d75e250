//! Login Use Case
//!
//! Checks an email and password against the credential store and issues a
//! session token.

use std::sync::Arc;

use crate::domain::entity::session_token::SessionToken;
use crate::domain::repository::CredentialStore;
use crate::domain::token::TokenService;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<C, T> {
    credentials: Arc<C>,
    tokens: Arc<T>,
}

impl<C, T> LoginUseCase<C, T>
where
    C: CredentialStore,
    T: TokenService,
{
    pub fn new(credentials: Arc<C>, tokens: Arc<T>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<SessionToken> {
        // An address that could never have been registered has no record
        let email = Email::new(input.email).map_err(|_| AuthError::NotFound)?;

        let record = self
            .credentials
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let password = RawPassword::for_verification(input.password);
        let password_hash = record.password_hash.clone();
        let matched = tokio::task::spawn_blocking(move || password_hash.verify(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))??;

        if !matched {
            tracing::warn!(user_id = %record.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&record.user_id)?;

        tracing::info!(
            user_id = %record.user_id,
            expires_at = %token.expires_at(),
            "User logged in"
        );

        Ok(token)
    }
}
