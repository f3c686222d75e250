//! Auth Middleware
//!
//! Resolves the caller's session before protected handlers run.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::token::TokenService;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a session resolving to a live identity
///
/// On success the [`Identity`](crate::domain::entity::identity::Identity)
/// is inserted as a request extension.
pub async fn require_identity<C, P, T>(
    State(state): State<AuthAppState<C, P, T>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let token = session_token_from_headers(req.headers(), &state.workflow.config().cookie_name)
        .ok_or(AuthError::MissingToken)?;

    let identity = state.workflow.resolve_session(&token).await?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Find the session token in a request
///
/// The `Authorization` header (bare token or `Bearer <token>`) wins over
/// the session cookie, unless it carries no token at all.
pub fn session_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(strip_bearer)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| extract_cookie(headers, cookie_name))
}

/// Drop an optional `Bearer` scheme; a scheme with no token leaves nothing
fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") => token.trim(),
        _ if value.eq_ignore_ascii_case("Bearer") => "",
        _ => value,
    }
}
