//! Role Entity

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{IdList, MenuId, MenuMarker, RoleId};

/// A named bundle of menu grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Granted menus, persisted in delimited form
    pub menus: IdList<MenuMarker>,
}

impl Role {
    pub fn new(id: RoleId, name: impl Into<String>, menus: impl IntoIterator<Item = MenuId>) -> Self {
        Self {
            id,
            name: name.into(),
            menus: menus.into_iter().collect(),
        }
    }

    pub fn menu_ids(&self) -> &[MenuId] {
        self.menus.ids()
    }
}
