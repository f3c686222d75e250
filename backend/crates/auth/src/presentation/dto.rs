//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the wire format clients already use (camelCase).

use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::Identity;

// ============================================================================
// Login
// ============================================================================

/// Login request (JSON body or form)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API login response
#[derive(Debug, Clone, Serialize)]
pub struct ApiLoginResponse {
    /// Always "Successful"
    pub authentication: &'static str,
    /// The session token, sent back in the Authorization header
    pub authorization: String,
    pub message: String,
}

// ============================================================================
// Register
// ============================================================================

/// Registration request (JSON body or form)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

/// API registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub identifier: String,
}

/// Plain message for browser flows
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub subject: String,
    pub message: String,
}

// ============================================================================
// User Info
// ============================================================================

/// Identity as returned to clients. Never carries a password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub mobile: String,
}

impl From<Identity> for UserInfoResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.user_id.to_string(),
            first_name: identity.first_name,
            last_name: identity.last_name,
            username: identity.username,
            email: identity.email.to_string(),
            mobile: identity.mobile,
        }
    }
}
