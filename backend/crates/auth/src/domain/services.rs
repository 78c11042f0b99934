//! Domain Services
//!
//! Pure menu-tree logic. Storage lookups are done by the application layer.

use std::collections::BTreeSet;

use crate::domain::entity::{Menu, MenuNode};
use crate::domain::value_object::{MenuId, ROOT_MENU_PARENT};

/// Granted ids plus the direct parents discovered for them
///
/// Only one level of ancestry is added. The root sentinel is never part
/// of the result.
pub fn with_direct_parents(
    granted: &BTreeSet<MenuId>,
    parent_ids: impl IntoIterator<Item = MenuId>,
) -> BTreeSet<MenuId> {
    granted
        .iter()
        .copied()
        .chain(parent_ids)
        .filter(|id| *id != ROOT_MENU_PARENT)
        .collect()
}

/// Nest a flat menu collection under its root entries
///
/// Roots are menus whose parent is [`ROOT_MENU_PARENT`]. Children keep the
/// relative order of `menus`. Menus whose parent is neither a root nor
/// reachable from one are left out.
pub fn assemble_tree(menus: &[Menu]) -> Vec<MenuNode> {
    menus
        .iter()
        .filter(|menu| menu.is_root())
        .map(|root| attach_children(root, menus))
        .collect()
}

fn attach_children(parent: &Menu, menus: &[Menu]) -> MenuNode {
    let children = menus
        .iter()
        .filter(|menu| menu.parent_id == parent.id && menu.id != parent.id)
        .map(|child| attach_children(child, menus))
        .collect();

    MenuNode {
        menu: parent.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: i64, parent: i64) -> Menu {
        Menu::new(MenuId::new(id), MenuId::new(parent), format!("m{id}"))
    }

    fn ids(values: &[i64]) -> BTreeSet<MenuId> {
        values.iter().copied().map(MenuId::new).collect()
    }

    #[test]
    fn test_direct_parents_added_root_sentinel_dropped() {
        let working = with_direct_parents(&ids(&[5, 9]), [MenuId::new(0), MenuId::new(2)]);
        assert_eq!(working, ids(&[2, 5, 9]));
    }

    #[test]
    fn test_assemble_nests_by_parent() {
        let menus = vec![menu(2, 0), menu(5, 0), menu(9, 2)];
        let tree = assemble_tree(&menus);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id(), MenuId::new(2));
        assert_eq!(tree[0].children[0].id(), MenuId::new(9));
        assert_eq!(tree[1].id(), MenuId::new(5));
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_children_keep_source_order() {
        let menus = vec![menu(1, 0), menu(30, 1), menu(10, 1), menu(20, 1)];
        let tree = assemble_tree(&menus);
        let order: Vec<i64> = tree[0].children.iter().map(|n| n.id().value()).collect();
        assert_eq!(order, vec![30, 10, 20]);
    }

    #[test]
    fn test_arbitrary_depth() {
        let menus = vec![menu(1, 0), menu(2, 1), menu(3, 2), menu(4, 3)];
        let tree = assemble_tree(&menus);
        assert_eq!(
            tree[0].flatten_ids(),
            vec![MenuId::new(1), MenuId::new(2), MenuId::new(3), MenuId::new(4)]
        );
    }

    #[test]
    fn test_orphans_are_dropped() {
        // 7's parent (3) is not in the working set
        let menus = vec![menu(1, 0), menu(7, 3)];
        let tree = assemble_tree(&menus);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble_tree(&[]).is_empty());
    }
}
