//! Auth Error Types
//!
//! Every workflow failure is one of four kinds: not found, conflict,
//! unauthorized, or internal. Input validation adds a fifth (bad request)
//! for registration only.
//!
//! The variants carry detail for logs. What reaches a client is decided by
//! [`AuthError::to_app_error`], which never includes store or key detail.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential record, or a token subject that no longer resolves
    #[error("User not found")]
    NotFound,

    /// Email is already registered
    #[error("Email address is already registered")]
    Conflict,

    /// Wrong password
    #[error("Incorrect password")]
    InvalidCredentials,

    /// Request carried no session token
    #[error("Missing session token")]
    MissingToken,

    /// Session token rejected at verification
    #[error("Invalid session token: {0}")]
    InvalidToken(TokenError),

    /// Registration input failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Store failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Anything else on our side: hashing, signing, corrupt records
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotFound => ErrorKind::NotFound,
            AuthError::Conflict => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::InvalidToken(_) => ErrorKind::Unauthorized,
            AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the client-facing AppError
    ///
    /// Token rejections all read the same so a caller cannot tell which
    /// check failed.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            kind => match self {
                AuthError::MissingToken | AuthError::InvalidToken(_) => {
                    AppError::new(kind, "Please log in")
                }
                other => AppError::new(kind, other.to_string()),
            },
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(e) => {
                tracing::warn!(reason = %e, "Session token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => {
                AuthError::Internal(format!("Session token signing failed: {msg}"))
            }
            rejected => AuthError::InvalidToken(rejected),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::Conflict,
            _ => AuthError::Database(err),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput(err.message().to_string()),
            ErrorKind::NotFound => AuthError::NotFound,
            ErrorKind::Conflict => AuthError::Conflict,
            ErrorKind::Unauthorized => AuthError::InvalidCredentials,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
