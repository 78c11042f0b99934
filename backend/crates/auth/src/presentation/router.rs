//! User Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::cache::MemoryCache;
use platform::cipher::{AesGcmCipher, PasswordCipher};

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionStore;
use crate::infra::{CacheSessionStore, MemoryDirectory};
use crate::presentation::handlers::{self, AuthAppState, Directory};
use crate::presentation::middleware::{TokenGuardState, require_token};

/// Create the user router over the in-memory directory and cache
pub fn user_router(
    directory: MemoryDirectory,
    cache: Arc<MemoryCache>,
    cipher: AesGcmCipher,
    config: AuthConfig,
) -> Router {
    let config = Arc::new(config);
    let sessions = CacheSessionStore::new(cache, config.clone());
    let state = AuthAppState::new(
        Arc::new(directory),
        Arc::new(sessions),
        Arc::new(cipher),
        config,
    );
    user_router_generic(state)
}

/// Create a generic user router for any directory, session store and cipher
pub fn user_router_generic<R, S, C>(state: AuthAppState<R, S, C>) -> Router
where
    R: Directory,
    S: SessionStore + Send + Sync + 'static,
    C: PasswordCipher + 'static,
{
    let guard = TokenGuardState {
        sessions: state.sessions.clone(),
        config: state.config.clone(),
    };

    let protected = Router::new()
        .route("/list", post(handlers::list_users::<R, S, C>))
        .route("/saveOrUpdate", post(handlers::save_or_update::<R, S, C>))
        .route("/deleted", post(handlers::delete_user::<R, S, C>))
        .route("/changePassword", post(handlers::change_password::<R, S, C>))
        .route("/userInfo", get(handlers::user_info::<R, S, C>))
        .route_layer(middleware::from_fn_with_state(guard, require_token::<S>));

    Router::new()
        .route("/login", post(handlers::login::<R, S, C>))
        .route("/logout", post(handlers::logout::<R, S, C>))
        .route("/register", post(handlers::register::<R, S, C>))
        .route("/checkToken", get(handlers::check_token::<R, S, C>))
        .merge(protected)
        .with_state(state)
}
