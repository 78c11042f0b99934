//! Menu Tree Builder
//!
//! Rebuilds the display tree for a set of granted menus: each granted menu
//! plus its direct parent, nested under the root-level entries.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entity::MenuNode;
use crate::domain::repository::MenuRepository;
use crate::domain::services::{assemble_tree, with_direct_parents};
use crate::domain::value_object::MenuId;
use crate::error::AuthResult;

pub struct MenuTreeBuilder<M>
where
    M: MenuRepository,
{
    menu_repo: Arc<M>,
}

impl<M> MenuTreeBuilder<M>
where
    M: MenuRepository,
{
    pub fn new(menu_repo: Arc<M>) -> Self {
        Self { menu_repo }
    }

    pub async fn build(&self, granted: &BTreeSet<MenuId>) -> AuthResult<Vec<MenuNode>> {
        if granted.is_empty() {
            return Ok(Vec::new());
        }

        let parent_ids = self.menu_repo.find_parent_ids(granted).await?;
        let working = with_direct_parents(granted, parent_ids);
        let menus = self.menu_repo.find_by_ids(&working).await?;

        Ok(assemble_tree(&menus))
    }
}
