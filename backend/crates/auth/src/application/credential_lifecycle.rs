//! Credential Lifecycle
//!
//! Password changes and administrative user maintenance.

use std::sync::Arc;

use platform::cipher::PasswordCipher;

use crate::application::config::AuthConfig;
use crate::application::input::{normalize_email, normalize_text};
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RoleId, UserId, UserName};
use crate::error::{AuthError, AuthResult, BestEffort};

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordInput {
    pub user_id: Option<UserId>,
    pub old_pwd: String,
    pub new_pwd: String,
    pub confirm_pwd: String,
}

/// Admin create/update; absent fields are left untouched on update
#[derive(Debug, Clone, Default)]
pub struct SaveUserInput {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub remarks: Option<String>,
    pub roles: Option<Vec<RoleId>>,
}

pub struct CredentialLifecycleManager<U, C>
where
    U: UserRepository,
    C: PasswordCipher,
{
    user_repo: Arc<U>,
    cipher: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> CredentialLifecycleManager<U, C>
where
    U: UserRepository,
    C: PasswordCipher,
{
    pub fn new(user_repo: Arc<U>, cipher: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            cipher,
            config,
        }
    }

    /// Replace the password after checking confirmation, novelty and the old password, in that order
    pub async fn change_password(&self, input: ChangePasswordInput) -> AuthResult<User> {
        let user_id = input
            .user_id
            .filter(|id| !id.is_zero())
            .ok_or(AuthError::MissingUserId)?;

        if input.new_pwd != input.confirm_pwd {
            return Err(AuthError::PasswordConfirmationMismatch);
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current = self.cipher.decrypt(&user.password)?;
        if input.new_pwd == current {
            return Err(AuthError::NewPasswordEqualsOld);
        }
        if input.old_pwd != current {
            return Err(AuthError::OldPasswordIncorrect);
        }

        user.set_password(self.cipher.encrypt(&input.new_pwd)?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(user)
    }

    /// Create (no id) or update (id) a user
    ///
    /// Both paths reset the password to the configured default.
    pub async fn save_or_update(&self, input: SaveUserInput) -> AuthResult<User> {
        let existing = match input.id.filter(|id| !id.is_zero()) {
            Some(id) => Some(
                self.user_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(AuthError::UserNotFound)?,
            ),
            None => None,
        };

        let default_password = self.cipher.encrypt(&self.config.default_password)?;

        let mut user = match existing {
            Some(mut user) => {
                if let Some(name) = normalize_text(input.username) {
                    let username = UserName::new(name)?;
                    if username != user.username {
                        self.ensure_username_free(&username, Some(user.id)).await?;
                        user.username = username;
                    }
                }
                user
            }
            None => {
                let name = normalize_text(input.username).ok_or_else(|| {
                    AuthError::ValidationFailure("Username is required".to_string())
                })?;
                let username = UserName::new(name)?;
                self.ensure_username_free(&username, None).await?;
                User::new(username, default_password.clone())
            }
        };

        if let Some(nickname) = normalize_text(input.nickname) {
            user.nickname = Some(nickname);
        }
        if let Some(email) = normalize_email(input.email)? {
            user.email = Some(email);
        }
        if let Some(remarks) = normalize_text(input.remarks) {
            user.remarks = Some(remarks);
        }
        if let Some(roles) = input.roles {
            user.set_roles(&roles);
        }
        user.set_password(default_password);

        let user = if user.is_persisted() {
            self.user_repo.update(&user).await?;
            user
        } else {
            self.user_repo.insert(user).await?
        };

        tracing::info!(user_id = %user.id, username = %user.username, roles = %user.roles, "User saved");

        Ok(user)
    }

    /// `UsernameTaken` unless the name is unused or held by `owner`
    async fn ensure_username_free(
        &self,
        username: &UserName,
        owner: Option<UserId>,
    ) -> AuthResult<()> {
        match self.user_repo.find_by_username(username.as_str()).await? {
            Some(holder) if Some(holder.id) != owner => Err(AuthError::UsernameTaken),
            _ => Ok(()),
        }
    }

    /// Remove a user if it exists; never fails
    pub async fn delete(&self, user_id: UserId) {
        let result: AuthResult<bool> = async {
            match self.user_repo.find_by_id(user_id).await? {
                Some(user) => self.user_repo.delete(user.id).await,
                None => Ok(false),
            }
        }
        .await;

        match result.best_effort("delete_user") {
            Some(true) => tracing::info!(user_id = %user_id, "User deleted"),
            Some(false) => tracing::debug!(user_id = %user_id, "Delete of unknown user ignored"),
            None => {}
        }
    }
}
