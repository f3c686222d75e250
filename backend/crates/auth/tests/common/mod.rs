//! Shared fixtures for auth integration tests

#![allow(dead_code)]

use std::sync::Arc;

use auth::application::{AuthConfig, AuthWorkflow, RegisterInput};
use auth::infra::{Es384TokenService, InMemoryCredentialStore, InMemoryProfileStore};
use platform::password::HashCost;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/es384_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/es384_public.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../fixtures/es384_other_private.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/es384_other_public.pem");

pub type MemoryWorkflow =
    AuthWorkflow<InMemoryCredentialStore, InMemoryProfileStore, Es384TokenService>;

pub fn token_service() -> Es384TokenService {
    Es384TokenService::from_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap()
}

pub fn other_token_service() -> Es384TokenService {
    Es384TokenService::from_pem(OTHER_PRIVATE_PEM.as_bytes(), OTHER_PUBLIC_PEM.as_bytes()).unwrap()
}

/// Default config with the cheapest Argon2 cost
pub fn test_config() -> AuthConfig {
    AuthConfig {
        password_cost: HashCost::minimal(),
        ..AuthConfig::default()
    }
}

/// In-memory workflow plus handles on its stores
pub struct Harness {
    pub credentials: Arc<InMemoryCredentialStore>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub tokens: Arc<Es384TokenService>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialStore::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            tokens: Arc::new(token_service()),
        }
    }

    pub fn workflow(&self) -> MemoryWorkflow {
        AuthWorkflow::new(
            Arc::clone(&self.credentials),
            Arc::clone(&self.profiles),
            Arc::clone(&self.tokens),
            test_config(),
        )
    }
}

pub fn ada() -> RegisterInput {
    RegisterInput {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        username: "ada".to_string(),
        email: "ada@x.com".to_string(),
        mobile: "555".to_string(),
        password: "secret123".to_string(),
    }
}
