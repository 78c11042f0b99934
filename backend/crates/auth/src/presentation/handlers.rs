//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};

use kernel::pagination::Page;
use platform::cipher::PasswordCipher;
use platform::request::extract_header;

use crate::application::config::AuthConfig;
use crate::application::{AuthService, CredentialLifecycleManager, ListUsersUseCase};
use crate::domain::entity::{SessionPayload, TokenOwner, UserListItem, UserProfile};
use crate::domain::repository::{MenuRepository, RoleRepository, SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AckResponse, ChangePasswordRequest, DeleteUserRequest, ListUsersRequest, LoginRequest,
    RegisterRequest, SaveUserRequest,
};

/// Everything the handlers need from the user directory
pub trait Directory: UserRepository + RoleRepository + MenuRepository + Send + Sync + 'static {}

impl<T> Directory for T where T: UserRepository + RoleRepository + MenuRepository + Send + Sync + 'static {}

/// Shared state for user handlers
pub struct AuthAppState<R, S, C>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    pub repo: Arc<R>,
    pub sessions: Arc<S>,
    pub cipher: Arc<C>,
    pub config: Arc<AuthConfig>,
}

impl<R, S, C> Clone for AuthAppState<R, S, C>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            sessions: self.sessions.clone(),
            cipher: self.cipher.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, S, C> AuthAppState<R, S, C>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    pub fn new(repo: Arc<R>, sessions: Arc<S>, cipher: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            sessions,
            cipher,
            config,
        }
    }

    fn auth_service(&self) -> AuthService<R, S, C> {
        AuthService::new(
            self.repo.clone(),
            self.sessions.clone(),
            self.cipher.clone(),
            self.config.clone(),
        )
    }

    fn lifecycle(&self) -> CredentialLifecycleManager<R, C> {
        CredentialLifecycleManager::new(self.repo.clone(), self.cipher.clone(), self.config.clone())
    }

    fn token(&self, headers: &HeaderMap) -> Option<String> {
        extract_header(headers, &self.config.token_header)
    }
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/user/login
pub async fn login<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<SessionPayload>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let payload = state.auth_service().login(req.into()).await?;
    Ok(Json(payload))
}

/// POST /api/user/logout
pub async fn logout<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    headers: HeaderMap,
) -> Json<AckResponse>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let token = state.token(&headers);
    state.auth_service().logout(token.as_deref()).await;
    Json(AckResponse::ok())
}

/// POST /api/user/register
pub async fn register<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserProfile>)>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let user = state.auth_service().register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.profile())))
}

/// GET /api/user/checkToken
pub async fn check_token<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    headers: HeaderMap,
) -> AuthResult<Json<TokenOwner>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let token = state.token(&headers).ok_or(AuthError::TokenExpired)?;
    let owner = state.auth_service().check_token(&token).await?;
    Ok(Json(owner))
}

/// GET /api/user/userInfo (requires token)
pub async fn user_info<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    headers: HeaderMap,
) -> AuthResult<Json<Option<SessionPayload>>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let token = state.token(&headers).ok_or(AuthError::TokenExpired)?;
    let session = state.auth_service().get_user_info_by_token(&token).await?;
    Ok(Json(session))
}

// ============================================================================
// User Admin (requires token)
// ============================================================================

/// POST /api/user/list
pub async fn list_users<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Json(req): Json<ListUsersRequest>,
) -> AuthResult<Json<Page<UserListItem>>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let page = ListUsersUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;
    Ok(Json(page))
}

/// POST /api/user/saveOrUpdate
pub async fn save_or_update<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Extension(actor): Extension<TokenOwner>,
    Json(req): Json<SaveUserRequest>,
) -> AuthResult<Json<UserListItem>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    tracing::debug!(actor = ?actor.username, subject = ?req.id, "Save user requested");
    let user = state.lifecycle().save_or_update(req.into()).await?;
    Ok(Json(user.list_item()))
}

/// POST /api/user/deleted
pub async fn delete_user<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Extension(actor): Extension<TokenOwner>,
    Json(req): Json<DeleteUserRequest>,
) -> Json<AckResponse>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    tracing::debug!(actor = ?actor.username, subject = %req.id, "Delete user requested");
    state.lifecycle().delete(req.id).await;
    Json(AckResponse::ok())
}

/// POST /api/user/changePassword
pub async fn change_password<R, S, C>(
    State(state): State<AuthAppState<R, S, C>>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<AckResponse>>
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    state.lifecycle().change_password(req.into()).await?;
    Ok(Json(AckResponse::ok()))
}
