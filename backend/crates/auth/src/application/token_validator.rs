//! Token Validator
//!
//! Session lookups for authenticated requests.

use std::sync::Arc;

use crate::domain::entity::{SessionPayload, TokenOwner};
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

pub struct TokenValidator<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> TokenValidator<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    /// Owner of a live token, or `TokenExpired`
    pub async fn check_token(&self, token: &str) -> AuthResult<TokenOwner> {
        match self.session_store.get(token).await? {
            Some(session) => Ok(session.owner()),
            None => {
                tracing::debug!("Token not found in session store");
                Err(AuthError::TokenExpired)
            }
        }
    }

    /// Raw session read; absence is not an error here
    pub async fn user_info_by_token(&self, token: &str) -> AuthResult<Option<SessionPayload>> {
        self.session_store.get(token).await
    }
}
