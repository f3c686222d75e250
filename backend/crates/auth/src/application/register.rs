//! Register Use Case
//!
//! Writes a credential record, then a profile record, under one freshly
//! generated identifier.
//!
//! The two writes go to independent stores and are not atomic. If the
//! profile write fails, the credential record stays behind with no
//! profile. Nothing compensates for it: identity lookups report the user
//! as not found, and registering the same email again is a conflict. The
//! failure is logged at error level with the orphaned identifier.

use std::sync::Arc;

use kernel::error::kind::ErrorKind;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_record::AuthRecord, profile_record::ProfileRecord};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<C, P> {
    credentials: Arc<C>,
    profiles: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<C, P> RegisterUseCase<C, P>
where
    C: CredentialStore,
    P: ProfileStore,
{
    pub fn new(credentials: Arc<C>, profiles: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials,
            profiles,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserId> {
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        // Advisory only. Two concurrent registrations can both pass this
        // check; the credential store's unique constraint decides.
        if self.credentials.find_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let cost = self.config.password_cost;
        let password_hash = tokio::task::spawn_blocking(move || UserPassword::from_raw(&password, &cost))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let record = AuthRecord::new(UserId::new(), email, password_hash);
        let user_id = self.credentials.insert(&record).await?;

        let profile = ProfileRecord::new(
            user_id,
            input.first_name,
            input.last_name,
            input.username,
            input.mobile,
        );

        if let Err(e) = self.profiles.insert(&profile).await {
            tracing::error!(
                user_id = %user_id,
                error = %e,
                "Profile write failed after credential write, credential record is orphaned"
            );
            return Err(match e.kind() {
                ErrorKind::InternalServerError => e,
                _ => AuthError::Internal(format!("Profile write failed: {e}")),
            });
        }

        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }
}
