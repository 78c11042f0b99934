//! Auth Service
//!
//! Login, logout, registration and token lookups.

use std::sync::Arc;

use platform::cipher::PasswordCipher;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::credential_verifier::{CredentialVerifier, present};
use crate::application::input::{normalize_email, normalize_text, validate_password};
use crate::application::menu_tree::MenuTreeBuilder;
use crate::application::role_resolver::RoleResolver;
use crate::application::token_validator::TokenValidator;
use crate::domain::entity::{SessionPayload, TokenOwner, User};
use crate::domain::repository::{MenuRepository, RoleRepository, SessionStore, UserRepository};
use crate::domain::value_object::UserName;
use crate::error::{AuthError, AuthResult, BestEffort};

/// Login input; either field may be missing
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Self-registration input
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub remarks: Option<String>,
}

pub struct AuthService<R, S, C>
where
    R: UserRepository + RoleRepository + MenuRepository,
    S: SessionStore,
    C: PasswordCipher,
{
    repo: Arc<R>,
    session_store: Arc<S>,
    cipher: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<R, S, C> AuthService<R, S, C>
where
    R: UserRepository + RoleRepository + MenuRepository,
    S: SessionStore,
    C: PasswordCipher,
{
    pub fn new(repo: Arc<R>, session_store: Arc<S>, cipher: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            session_store,
            cipher,
            config,
        }
    }

    /// Authenticate and open a session
    ///
    /// The returned payload is also what the session store holds for the token.
    pub async fn login(&self, input: LoginInput) -> AuthResult<SessionPayload> {
        let username = present(input.username.as_deref());
        let password = present(input.password.as_deref());

        if username.is_none() && password.is_none() {
            return Err(AuthError::MissingCredentials);
        }
        tracing::info!(username = username.unwrap_or_default(), "Login attempt");

        // A partial pair cannot match any stored user
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = CredentialVerifier::new(self.repo.clone(), self.cipher.clone())
            .verify(Some(username), Some(password))
            .await?;

        let token = Uuid::new_v4().to_string();

        let granted = RoleResolver::new(self.repo.clone())
            .resolve(user.role_ids())
            .await?;
        let menus = MenuTreeBuilder::new(self.repo.clone()).build(&granted).await?;

        let payload = SessionPayload::new(user.profile(), token.clone(), menus);
        self.session_store
            .put(&token, &payload, self.config.session_ttl)
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            menus = payload.menus.len(),
            "User logged in"
        );

        Ok(payload)
    }

    /// Drop the session for `token`; never fails
    pub async fn logout(&self, token: Option<&str>) {
        let Some(token) = present(token) else {
            tracing::debug!("Logout without token");
            return;
        };

        if self
            .session_store
            .delete(token)
            .await
            .best_effort("logout")
            .is_some()
        {
            tracing::info!("User logged out");
        }
    }

    /// Create an account
    ///
    /// A taken username is reported as `DuplicateUser`; every other failure
    /// surfaces as `ValidationFailure`.
    pub async fn register(&self, input: RegisterInput) -> AuthResult<User> {
        match self.try_register(input).await {
            Ok(user) => Ok(user),
            Err(AuthError::DuplicateUser) => Err(AuthError::DuplicateUser),
            Err(e) => {
                tracing::error!(error = %e, "Registration failed");
                Err(AuthError::ValidationFailure(e.to_string()))
            }
        }
    }

    async fn try_register(&self, input: RegisterInput) -> AuthResult<User> {
        let username = UserName::new(&input.username)?;
        validate_password(&input.password)?;
        let email = normalize_email(input.email)?;

        if self
            .repo
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser);
        }

        let mut user = User::new(username, self.cipher.encrypt(&input.password)?);
        user.nickname = normalize_text(input.nickname);
        user.email = email;
        user.remarks = normalize_text(input.remarks);

        // A concurrent registration can claim the name after the lookup above.
        let user = self.repo.insert(user).await.map_err(|e| match e {
            AuthError::UsernameTaken => AuthError::DuplicateUser,
            other => other,
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    pub async fn check_token(&self, token: &str) -> AuthResult<TokenOwner> {
        self.token_validator().check_token(token).await
    }

    pub async fn get_user_info_by_token(&self, token: &str) -> AuthResult<Option<SessionPayload>> {
        self.token_validator().user_info_by_token(token).await
    }

    fn token_validator(&self) -> TokenValidator<S> {
        TokenValidator::new(self.session_store.clone())
    }
}
