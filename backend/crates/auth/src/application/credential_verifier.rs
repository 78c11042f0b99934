//! Credential Verifier
//!
//! Checks a username/password pair by decrypting the stored password and
//! comparing plaintexts.

use std::sync::Arc;

use platform::cipher::PasswordCipher;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CredentialVerifier<U, C>
where
    U: UserRepository,
    C: PasswordCipher,
{
    user_repo: Arc<U>,
    cipher: Arc<C>,
}

impl<U, C> CredentialVerifier<U, C>
where
    U: UserRepository,
    C: PasswordCipher,
{
    pub fn new(user_repo: Arc<U>, cipher: Arc<C>) -> Self {
        Self { user_repo, cipher }
    }

    /// Return the matching user
    ///
    /// Empty strings count as absent. An unknown username and a wrong
    /// password both yield `InvalidCredentials`.
    pub async fn verify(&self, username: Option<&str>, password: Option<&str>) -> AuthResult<User> {
        let (Some(username), Some(password)) = (present(username), present(password)) else {
            return Err(AuthError::MissingCredentials);
        };

        let Some(user) = self.user_repo.find_by_username(username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let stored = self.cipher.decrypt(&user.password)?;
        if stored != password {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// `None` for absent or empty input
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
