//! Auth Middleware
//!
//! Middleware for requiring a live session token on protected routes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use platform::request::extract_header;

use crate::application::TokenValidator;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionStore;
use crate::error::AuthError;

/// Middleware state
pub struct TokenGuardState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> Clone for TokenGuardState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

/// Reject requests without a live token
///
/// The token's owner is stored in request extensions for downstream handlers.
pub async fn require_token<S>(
    State(state): State<TokenGuardState<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionStore + Send + Sync + 'static,
{
    let token =
        extract_header(req.headers(), &state.config.token_header).ok_or(AuthError::TokenExpired)?;

    let owner = TokenValidator::new(state.sessions.clone())
        .check_token(&token)
        .await?;

    req.extensions_mut().insert(owner);

    Ok(next.run(req).await)
}
