//! Roles and permissions for the federation platform.
//!
//! Maps an authenticated session to a coarse role (admin/editor/user) and
//! answers `resource:action` capability questions used to gate admin
//! sections. Role lookups fail closed: any provider error resolves to
//! anonymous, never to a wider grant.

pub mod di;
pub mod error;
pub mod permission;
pub mod resolver;
pub mod role;
pub mod session;

pub use error::{AuthError, Result};
pub use permission::{has_all, has_any, has_permission, Permission, PermissionTable};
pub use resolver::{resolve_role, RoleResolver};
pub use role::Role;
pub use session::{
    AuthEvent, HttpSessionProvider, MemorySessionProvider, Session, SessionProvider,
};
