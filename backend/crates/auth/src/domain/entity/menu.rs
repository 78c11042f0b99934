//! Menu Entity
//!
//! Menus form a forest keyed by `parent_id`; top-level menus carry
//! [`ROOT_MENU_PARENT`].

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{MenuId, ROOT_MENU_PARENT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: MenuId,
    pub parent_id: MenuId,
    pub name: String,
    pub title: String,
    pub path: String,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub sort: i32,
    pub hidden: bool,
}

impl Menu {
    pub fn new(id: MenuId, parent_id: MenuId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            parent_id,
            title: name.clone(),
            path: format!("/{}", name.to_lowercase()),
            name,
            component: None,
            icon: None,
            sort: 0,
            hidden: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_MENU_PARENT
    }
}

/// Menu with its nested children, as rendered into a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    #[serde(flatten)]
    pub menu: Menu,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn id(&self) -> MenuId {
        self.menu.id
    }

    /// Depth-first ids, parents before children
    pub fn flatten_ids(&self) -> Vec<MenuId> {
        let mut ids = vec![self.id()];
        for child in &self.children {
            ids.extend(child.flatten_ids());
        }
        ids
    }
}
