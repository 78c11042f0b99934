//! In-Memory Directory
//!
//! Users, roles and menus held in process. Users keep insertion order and
//! receive auto-increment ids.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use kernel::pagination::Page;
use tokio::sync::RwLock;

use crate::domain::entity::{Menu, Role, User};
use crate::domain::repository::{MenuRepository, RoleRepository, UserQuery, UserRepository};
use crate::domain::value_object::{MenuId, RoleId, UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<User>,
    roles: Vec<Role>,
    menus: Vec<Menu>,
    last_user_id: i64,
}

/// In-memory user directory
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a role
    pub async fn insert_role(&self, role: Role) {
        let mut state = self.state.write().await;
        match state.roles.iter_mut().find(|r| r.id == role.id) {
            Some(existing) => *existing = role,
            None => state.roles.push(role),
        }
    }

    /// Add or replace a menu
    pub async fn insert_menu(&self, menu: Menu) {
        let mut state = self.state.write().await;
        match state.menus.iter_mut().find(|m| m.id == menu.id) {
            Some(existing) => *existing = menu,
            None => state.menus.push(menu),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl UserRepository for MemoryDirectory {
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn insert(&self, mut user: User) -> AuthResult<User> {
        let mut state = self.state.write().await;

        // Unique key on username
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        state.last_user_id += 1;
        user.id = UserId::new(state.last_user_id);
        state.users.push(user.clone());

        tracing::debug!(user_id = %user.id, "User row inserted");

        Ok(user)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut state = self.state.write().await;

        if state
            .users
            .iter()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(AuthError::UsernameTaken);
        }

        let row = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AuthError::UserNotFound)?;

        *row = user.clone();
        row.updated_at = Utc::now();

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<bool> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != user_id);
        Ok(state.users.len() != before)
    }

    async fn list(&self, query: &UserQuery) -> AuthResult<Page<User>> {
        let state = self.state.read().await;
        let matches: Vec<User> = state
            .users
            .iter()
            .filter(|u| {
                query
                    .username
                    .as_deref()
                    .is_none_or(|needle| contains_ignore_case(u.username.as_str(), needle))
            })
            .filter(|u| {
                query.nickname.as_deref().is_none_or(|needle| {
                    u.nickname
                        .as_deref()
                        .is_some_and(|nickname| contains_ignore_case(nickname, needle))
                })
            })
            .cloned()
            .collect();

        Ok(Page::from_items(matches, query.page))
    }
}

impl RoleRepository for MemoryDirectory {
    async fn find_by_ids(&self, role_ids: &[RoleId]) -> AuthResult<Vec<Role>> {
        let state = self.state.read().await;
        Ok(state
            .roles
            .iter()
            .filter(|r| role_ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

impl MenuRepository for MemoryDirectory {
    async fn find_parent_ids(&self, menu_ids: &BTreeSet<MenuId>) -> AuthResult<Vec<MenuId>> {
        let state = self.state.read().await;
        Ok(state
            .menus
            .iter()
            .filter(|m| menu_ids.contains(&m.id))
            .map(|m| m.parent_id)
            .collect())
    }

    async fn find_by_ids(&self, menu_ids: &BTreeSet<MenuId>) -> AuthResult<Vec<Menu>> {
        let state = self.state.read().await;
        Ok(state
            .menus
            .iter()
            .filter(|m| menu_ids.contains(&m.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{ROOT_MENU_PARENT, UserName};
    use kernel::pagination::PageQuery;

    fn user(name: &str) -> User {
        User::new(UserName::new(name).unwrap(), "cipher".to_string())
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let dir = MemoryDirectory::new();
        let a = dir.insert(user("alice")).await.unwrap();
        let b = dir.insert(user("bob")).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert!(dir.find_by_username("bob").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_username() {
        let dir = MemoryDirectory::new();
        dir.insert(user("alice")).await.unwrap();
        assert!(matches!(
            dir.insert(user("alice")).await,
            Err(AuthError::UsernameTaken)
        ));
        assert_eq!(dir.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let dir = MemoryDirectory::new();
        let mut ghost = user("ghost");
        ghost.id = UserId::new(99);
        assert!(matches!(dir.update(&ghost).await, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_rejects_username_of_another_user() {
        let dir = MemoryDirectory::new();
        dir.insert(user("alice")).await.unwrap();
        let mut bob = dir.insert(user("bob")).await.unwrap();

        bob.username = UserName::new("alice").unwrap();
        assert!(matches!(dir.update(&bob).await, Err(AuthError::UsernameTaken)));

        bob.username = UserName::new("bobby").unwrap();
        dir.update(&bob).await.unwrap();
        assert!(dir.find_by_username("bobby").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let dir = MemoryDirectory::new();
        let a = dir.insert(user("alice")).await.unwrap();
        assert!(dir.delete(a.id).await.unwrap());
        assert!(!dir.delete(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_by_substring() {
        let dir = MemoryDirectory::new();
        for name in ["alice", "malik", "bob"] {
            dir.insert(user(name)).await.unwrap();
        }
        let query = UserQuery {
            username: Some("LI".to_string()),
            nickname: None,
            page: PageQuery::default(),
        };
        let page = dir.list(&query).await.unwrap();
        let names: Vec<_> = page.rows.iter().map(|u| u.username.to_string()).collect();
        assert_eq!(names, ["alice", "malik"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_menu_lookups_keep_storage_order() {
        let dir = MemoryDirectory::new();
        dir.insert_menu(Menu::new(MenuId::new(9), MenuId::new(2), "Cases")).await;
        dir.insert_menu(Menu::new(MenuId::new(2), ROOT_MENU_PARENT, "Api")).await;

        let ids = BTreeSet::from([MenuId::new(2), MenuId::new(9)]);
        let menus = MenuRepository::find_by_ids(&dir, &ids).await.unwrap();
        assert_eq!(menus[0].id, MenuId::new(9));

        let parents = dir.find_parent_ids(&BTreeSet::from([MenuId::new(9)])).await.unwrap();
        assert_eq!(parents, vec![MenuId::new(2)]);
    }

    #[tokio::test]
    async fn test_unknown_roles_are_absent() {
        let dir = MemoryDirectory::new();
        dir.insert_role(Role::new(RoleId::new(1), "admin", [MenuId::new(5)])).await;
        let roles = RoleRepository::find_by_ids(&dir, &[RoleId::new(1), RoleId::new(4)])
            .await
            .unwrap();
        assert_eq!(roles.len(), 1);
    }
}
