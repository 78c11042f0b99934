//! Startup seed data
//!
//! The directory lives in memory, so the menus, the admin role and the
//! admin account are recreated on every start.

use auth::domain::entity::{Menu, Role, User};
use auth::domain::repository::UserRepository;
use auth::domain::value_object::{MenuId, ROOT_MENU_PARENT, RoleId, UserName};
use auth::{AuthResult, MemoryDirectory};
use platform::cipher::PasswordCipher;

pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_ROLE: i64 = 1;

/// (id, parent, name)
const MENUS: &[(i64, i64, &str)] = &[
    (1, 0, "Home"),
    (2, 0, "Api"),
    (3, 2, "Project"),
    (4, 2, "Case"),
    (5, 0, "System"),
    (6, 5, "User"),
    (7, 5, "Role"),
    (8, 5, "Menu"),
];

pub async fn seed_directory<C>(
    directory: &MemoryDirectory,
    cipher: &C,
    admin_password: &str,
) -> AuthResult<()>
where
    C: PasswordCipher,
{
    for (sort, &(id, parent, name)) in MENUS.iter().enumerate() {
        let parent = if parent == 0 { ROOT_MENU_PARENT } else { MenuId::new(parent) };
        let mut menu = Menu::new(MenuId::new(id), parent, name);
        menu.sort = sort as i32;
        directory.insert_menu(menu).await;
    }

    directory
        .insert_role(Role::new(
            RoleId::new(ADMIN_ROLE),
            "admin",
            MENUS.iter().map(|&(id, _, _)| MenuId::new(id)),
        ))
        .await;

    let mut admin = User::new(
        UserName::new(ADMIN_USERNAME)?,
        cipher.encrypt(admin_password)?,
    );
    admin.nickname = Some("Administrator".to_string());
    admin.set_roles(&[RoleId::new(ADMIN_ROLE)]);
    let admin = directory.insert(admin).await?;

    tracing::info!(
        user_id = %admin.id,
        menus = MENUS.len(),
        "Seeded admin account and menus"
    );

    Ok(())
}
