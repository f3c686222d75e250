//! Identity Composer
//!
//! Joins a credential record and a profile record into one [`Identity`].

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct IdentityComposer<C, P> {
    credentials: Arc<C>,
    profiles: Arc<P>,
}

impl<C, P> Clone for IdentityComposer<C, P> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<C, P> IdentityComposer<C, P>
where
    C: CredentialStore,
    P: ProfileStore,
{
    pub fn new(credentials: Arc<C>, profiles: Arc<P>) -> Self {
        Self {
            credentials,
            profiles,
        }
    }

    /// Compose the identity for `user_id`
    ///
    /// Missing on either side is `NotFound`. A credential record whose
    /// profile write never landed looks exactly like an unknown user.
    pub async fn compose(&self, user_id: &UserId) -> AuthResult<Identity> {
        let (auth, profile) = tokio::try_join!(
            self.credentials.find_by_identifier(user_id),
            self.profiles.find_by_identifier(user_id),
        )?;

        let auth = auth.ok_or(AuthError::NotFound)?;
        let Some(profile) = profile else {
            tracing::warn!(user_id = %user_id, "Credential record has no profile record");
            return Err(AuthError::NotFound);
        };

        Identity::from_records(&auth, profile)
            .ok_or_else(|| AuthError::Internal("Store returned a record for another user".to_string()))
    }
}
