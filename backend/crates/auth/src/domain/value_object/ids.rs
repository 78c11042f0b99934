use kernel::id::Id;

pub struct UserMarker;
pub struct RoleMarker;
pub struct MenuMarker;

pub type UserId = Id<UserMarker>;
pub type RoleId = Id<RoleMarker>;
pub type MenuId = Id<MenuMarker>;

/// Parent id carried by top-level menus
pub const ROOT_MENU_PARENT: MenuId = MenuId::new(0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_parent_is_zero() {
        assert!(ROOT_MENU_PARENT.is_zero());
        assert_eq!(MenuId::new(0), ROOT_MENU_PARENT);
    }

    #[test]
    fn test_from_raw() {
        let user_id = UserId::from(12);
        assert_eq!(user_id.value(), 12);
        assert_eq!(user_id.to_string(), "12");
    }
}
