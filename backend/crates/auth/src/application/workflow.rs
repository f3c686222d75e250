//! Auth Workflow
//!
//! The single entry point transport code calls. Holds no per-request
//! state; every operation is an independent call over the injected
//! stores and token service.
//!
//! ```rust,no_run
//! # async fn demo(
//! #     workflow: auth::application::AuthWorkflow<
//! #         auth::infra::memory::InMemoryCredentialStore,
//! #         auth::infra::memory::InMemoryProfileStore,
//! #         auth::infra::jwt::Es384TokenService,
//! #     >,
//! # ) -> auth::error::AuthResult<()> {
//! use auth::application::{LoginInput, RegisterInput};
//!
//! workflow
//!     .register(RegisterInput {
//!         first_name: "Ada".into(),
//!         last_name: "Lovelace".into(),
//!         username: "ada".into(),
//!         email: "ada@x.com".into(),
//!         mobile: "555".into(),
//!         password: "secret123".into(),
//!     })
//!     .await?;
//!
//! let token = workflow
//!     .login(LoginInput {
//!         email: "ada@x.com".into(),
//!         password: "secret123".into(),
//!     })
//!     .await?;
//!
//! let identity = workflow.resolve_session(token.as_str()).await?;
//! assert_eq!(identity.username, "ada");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::identity_composer::IdentityComposer;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::resolve_session::ResolveSessionUseCase;
use crate::domain::entity::{identity::Identity, session_token::SessionToken};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::token::TokenService;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

pub struct AuthWorkflow<C, P, T> {
    login: LoginUseCase<C, T>,
    register: RegisterUseCase<C, P>,
    resolve_session: ResolveSessionUseCase<C, P, T>,
    composer: IdentityComposer<C, P>,
    config: Arc<AuthConfig>,
}

impl<C, P, T> AuthWorkflow<C, P, T>
where
    C: CredentialStore,
    P: ProfileStore,
    T: TokenService,
{
    pub fn new(credentials: Arc<C>, profiles: Arc<P>, tokens: Arc<T>, config: AuthConfig) -> Self {
        let config = Arc::new(config);
        let composer = IdentityComposer::new(Arc::clone(&credentials), Arc::clone(&profiles));

        Self {
            login: LoginUseCase::new(Arc::clone(&credentials), Arc::clone(&tokens)),
            register: RegisterUseCase::new(credentials, profiles, Arc::clone(&config)),
            resolve_session: ResolveSessionUseCase::new(tokens, composer.clone()),
            composer,
            config,
        }
    }

    /// Verify a password and issue a session token
    pub async fn login(&self, input: LoginInput) -> AuthResult<SessionToken> {
        self.login.execute(input).await
    }

    /// Create a user and return its new identifier
    pub async fn register(&self, input: RegisterInput) -> AuthResult<UserId> {
        self.register.execute(input).await
    }

    /// Verify a session token and compose the identity it names
    pub async fn resolve_session(&self, token: &str) -> AuthResult<Identity> {
        self.resolve_session.execute(token).await
    }

    /// Compose an identity without a token, e.g. right after login
    pub async fn identity(&self, user_id: &UserId) -> AuthResult<Identity> {
        self.composer.compose(user_id).await
    }
}

impl<C, P, T> AuthWorkflow<C, P, T> {
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
