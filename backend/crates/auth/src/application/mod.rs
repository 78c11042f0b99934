//! Application Layer
//!
//! Use cases and application services.

pub mod auth_service;
pub mod config;
pub mod credential_lifecycle;
pub mod credential_verifier;
pub mod input;
pub mod list_users;
pub mod menu_tree;
pub mod role_resolver;
pub mod token_validator;

// Re-exports
pub use auth_service::{AuthService, LoginInput, RegisterInput};
pub use config::AuthConfig;
pub use credential_lifecycle::{ChangePasswordInput, CredentialLifecycleManager, SaveUserInput};
pub use credential_verifier::CredentialVerifier;
pub use list_users::ListUsersUseCase;
pub use menu_tree::MenuTreeBuilder;
pub use role_resolver::RoleResolver;
pub use token_validator::TokenValidator;
