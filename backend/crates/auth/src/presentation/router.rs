//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::AuthWorkflow;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::token::TokenService;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_identity;

/// Create the Auth router for any store and token service implementation
///
/// | Route | Input | Success |
/// |---|---|---|
/// | `POST /auth/login` | form | 303 to `/home`, session cookie |
/// | `POST /auth/register` | form | message |
/// | `GET /home` | cookie or header | identity |
/// | `POST /api/login` | JSON | token in body |
/// | `POST /api/register` | JSON | 201, identifier |
/// | `GET /api/userinfo` | header or cookie | identity |
pub fn auth_router<C, P, T>(workflow: AuthWorkflow<C, P, T>) -> Router
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let state = AuthAppState::new(workflow);

    let protected: Router<AuthAppState<C, P, T>> = Router::new()
        .route("/home", get(handlers::home))
        .route("/api/userinfo", get(handlers::api_userinfo))
        .route_layer(from_fn_with_state(state.clone(), require_identity::<C, P, T>));

    Router::new()
        .route("/auth/login", post(handlers::browser_login::<C, P, T>))
        .route("/auth/register", post(handlers::browser_register::<C, P, T>))
        .route("/api/login", post(handlers::api_login::<C, P, T>))
        .route("/api/register", post(handlers::api_register::<C, P, T>))
        .merge(protected)
        .with_state(state)
}
