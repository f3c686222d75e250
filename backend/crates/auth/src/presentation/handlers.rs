//! HTTP Handlers
//!
//! Thin callers of [`AuthWorkflow`]: extract input, call one operation,
//! render the result. Errors render through `AuthError`'s `IntoResponse`.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::application::{AuthWorkflow, LoginInput, RegisterInput};
use crate::domain::entity::{identity::Identity, session_token::SessionToken};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::token::TokenService;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ApiLoginResponse, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse,
    UserInfoResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<C, P, T> {
    pub workflow: Arc<AuthWorkflow<C, P, T>>,
}

impl<C, P, T> Clone for AuthAppState<C, P, T> {
    fn clone(&self) -> Self {
        Self {
            workflow: Arc::clone(&self.workflow),
        }
    }
}

impl<C, P, T> AuthAppState<C, P, T> {
    pub fn new(workflow: AuthWorkflow<C, P, T>) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            email: req.email,
            mobile: req.mobile,
            password: req.password,
        }
    }
}

// ============================================================================
// Browser flows
// ============================================================================

/// POST /auth/login
///
/// Sets the session cookie and redirects to `/home`.
pub async fn browser_login<C, P, T>(
    State(state): State<AuthAppState<C, P, T>>,
    Form(req): Form<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let token = state.workflow.login(req.into()).await?;
    let cookie = session_cookie(&state.workflow, &token)?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/home")))
}

/// POST /auth/register
pub async fn browser_register<C, P, T>(
    State(state): State<AuthAppState<C, P, T>>,
    Form(req): Form<RegisterRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let username = req.username.clone();
    state.workflow.register(req.into()).await?;

    Ok(Json(MessageResponse {
        subject: "Registration completed".to_string(),
        message: format!("User {} successfully registered", username),
    }))
}

/// GET /home (behind `require_identity`)
pub async fn home(Extension(identity): Extension<Identity>) -> Json<UserInfoResponse> {
    Json(identity.into())
}

// ============================================================================
// API flows
// ============================================================================

/// POST /api/login
pub async fn api_login<C, P, T>(
    State(state): State<AuthAppState<C, P, T>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<ApiLoginResponse>>
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let email = req.email.clone();
    let token = state.workflow.login(req.into()).await?;

    // The token is already issued, so a failed profile lookup only
    // downgrades the greeting to the email
    let name = match state.workflow.identity(token.subject()).await {
        Ok(identity) => identity.username,
        Err(e) => {
            tracing::warn!(
                user_id = %token.subject(),
                error = %e,
                "Greeting falls back to email"
            );
            email
        }
    };

    Ok(Json(ApiLoginResponse {
        authentication: "Successful",
        authorization: token.into_string(),
        message: format!("Welcome, {}", name),
    }))
}

/// POST /api/register
pub async fn api_register<C, P, T>(
    State(state): State<AuthAppState<C, P, T>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    C: CredentialStore + Sync + 'static,
    P: ProfileStore + Sync + 'static,
    T: TokenService + 'static,
{
    let user_id = state.workflow.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            identifier: user_id.to_string(),
        }),
    ))
}

/// GET /api/userinfo (behind `require_identity`)
pub async fn api_userinfo(Extension(identity): Extension<Identity>) -> Json<UserInfoResponse> {
    Json(identity.into())
}

// ============================================================================
// Helpers
// ============================================================================

/// Set-Cookie value that expires together with the token
fn session_cookie<C, P, T>(
    workflow: &AuthWorkflow<C, P, T>,
    token: &SessionToken,
) -> AuthResult<HeaderValue> {
    workflow
        .config()
        .session_cookie(token.remaining_secs(Utc::now()))
        .set_cookie_header(token.as_str())
        .ok_or_else(|| AuthError::Internal("Session token is not a valid cookie value".to_string()))
}
