//! Auth (Identity and Session Token) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Records, identity, token claims, store and token traits
//! - `application/` - Identity composition, use cases, the workflow facade
//! - `infra/` - PostgreSQL and in-memory stores, ES384 token service
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration writing a credential record and a profile record under
//!   one server-generated identifier
//! - Login with email + password, issuing an 8 minute session token
//! - Session resolution from a cookie or an `Authorization` header
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, verified off the async executor
//! - Stateless ES384 JWTs; verification is pinned to ES384
//! - No revocation list: deleting a credential record makes its tokens
//!   resolve to nothing
//! - Credential and profile stores are independent; registration is not
//!   atomic across them (see `application::register`)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthWorkflow};
pub use domain::{Identity, SessionToken, TokenError, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{
    Es384TokenService, InMemoryCredentialStore, InMemoryProfileStore, KeyError,
    PgCredentialStore, PgProfileStore,
};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
