//! Value Object Module

pub mod email;
pub mod id_list;
pub mod ids;
pub mod user_name;

pub use email::Email;
pub use id_list::{IdList, IdListError};
pub use ids::{MenuId, MenuMarker, ROOT_MENU_PARENT, RoleId, RoleMarker, UserId, UserMarker};
pub use user_name::UserName;
