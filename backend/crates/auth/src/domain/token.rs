//! Session Token Service Trait
//!
//! Signing and verification are pure CPU work over an immutable key pair,
//! so the trait is synchronous.

use thiserror::Error;

use crate::domain::entity::session_token::SessionToken;
use crate::domain::value_object::user_id::UserId;

/// Why a token was not accepted (or could not be issued)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("session token has expired")]
    Expired,

    /// Bad signature, or a token claiming any algorithm but the pinned one
    #[error("session token signature is invalid")]
    InvalidSignature,

    #[error("session token is malformed")]
    Malformed,

    #[error("session token could not be signed: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens
pub trait TokenService: Send + Sync {
    /// Sign a token for `subject`, valid from now for the fixed TTL
    fn issue(&self, subject: &UserId) -> Result<SessionToken, TokenError>;

    /// Return the subject if the token is well formed, signed with the
    /// pinned algorithm by our key, and not yet expired
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
