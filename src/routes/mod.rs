//! Route permission resolution for the intranet navigation.
//!
//! Given the full list of route records and the requesting user's memberships,
//! [`RouteResolver::resolve`] produces the routes the user can see together with
//! lookups for building menus (`children`, `top_level`, `main_navigation`) and
//! guarding pages (`permission_for_path`).

pub mod resolver;
pub mod types;

pub use resolver::{AccessibleRoutes, RouteResolver};
pub use types::{
    AccessId, AccessibleRoute, RoutePermission, RoutePermissionStatus, UserAccessContext,
};
