//! Resolve Session Use Case
//!
//! Turns a session token back into the identity it was issued for.

use std::sync::Arc;

use crate::application::identity_composer::IdentityComposer;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::token::TokenService;
use crate::error::AuthResult;

/// Resolve session use case
pub struct ResolveSessionUseCase<C, P, T> {
    tokens: Arc<T>,
    composer: IdentityComposer<C, P>,
}

impl<C, P, T> ResolveSessionUseCase<C, P, T>
where
    C: CredentialStore,
    P: ProfileStore,
    T: TokenService,
{
    pub fn new(tokens: Arc<T>, composer: IdentityComposer<C, P>) -> Self {
        Self { tokens, composer }
    }

    /// Any token failure is unauthorized. A valid token whose subject has
    /// since been deleted is not found.
    pub async fn execute(&self, token: &str) -> AuthResult<Identity> {
        let subject = self.tokens.verify(token)?;
        self.composer.compose(&subject).await
    }
}
