//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::cookie::CookieConfig;
use platform::password::HashCost;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Whether to mark the session cookie Secure. Off by default so the
    /// service works over plain HTTP; turn it on behind TLS.
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Argon2id work factor for new password hashes
    pub password_cost: HashCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "jwt".to_string(),
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            password_cost: HashCost::default(),
        }
    }
}

impl AuthConfig {
    /// Session cookie that lives exactly as long as the token it carries
    pub fn session_cookie(&self, max_age_secs: i64) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(max_age_secs),
        }
    }
}
