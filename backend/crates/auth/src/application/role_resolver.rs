//! Role Resolver
//!
//! Turns a user's role ids into the union of menu ids those roles grant.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::repository::RoleRepository;
use crate::domain::value_object::{MenuId, RoleId};
use crate::error::AuthResult;

pub struct RoleResolver<R>
where
    R: RoleRepository,
{
    role_repo: Arc<R>,
}

impl<R> RoleResolver<R>
where
    R: RoleRepository,
{
    pub fn new(role_repo: Arc<R>) -> Self {
        Self { role_repo }
    }

    /// Unknown role ids are ignored
    pub async fn resolve(&self, role_ids: &[RoleId]) -> AuthResult<BTreeSet<MenuId>> {
        if role_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let roles = self.role_repo.find_by_ids(role_ids).await?;

        Ok(roles
            .iter()
            .flat_map(|role| role.menu_ids().iter().copied())
            .collect())
    }
}
