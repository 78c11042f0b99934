//! List Users Use Case

use std::sync::Arc;

use kernel::pagination::Page;

use crate::application::input::normalize_text;
use crate::domain::entity::UserListItem;
use crate::domain::repository::{UserQuery, UserRepository};
use crate::error::AuthResult;

pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, query: UserQuery) -> AuthResult<Page<UserListItem>> {
        let query = UserQuery {
            username: normalize_text(query.username),
            nickname: normalize_text(query.nickname),
            page: query.page.normalized(),
        };

        let page = self.user_repo.list(&query).await?;
        Ok(page.map(|user| user.list_item()))
    }
}
