//! Route permission resolution.
//!
//! Decides which routes a user can see (accessible) and which of those they
//! can open (clickable). The access model is:
//! - **Public** routes are visible to everyone
//! - **Restricted** routes (any department/team/role/user list set) are visible
//!   to users sharing at least one membership, or listed by id
//! - **Unrestricted** routes inherit visibility from their parent route; with no
//!   resolvable parent they are visible to everyone
//! - **Developing** routes stay visible but are only clickable for members of the
//!   technology department

use crate::config::{Config, DEFAULT_TECHNOLOGY_DEPARTMENT};
use crate::error::Result;
use crate::hierarchy::{index_by_id, walk_up, ChainEnd};
use crate::routes::types::{
    AccessibleRoute, RoutePermission, RoutePermissionStatus, UserAccessContext,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolves route visibility for users.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    technology_department: String,
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TECHNOLOGY_DEPARTMENT)
    }
}

impl RouteResolver {
    /// Creates a resolver whose development bypass is granted to `technology_department`.
    pub fn new(technology_department: impl Into<String>) -> Self {
        Self {
            technology_department: technology_department.into(),
        }
    }

    /// Creates a resolver from runtime configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.technology_department.clone())
    }

    /// Returns the department name that bypasses the development gate.
    pub fn technology_department(&self) -> &str {
        &self.technology_department
    }

    /// Determines whether `user` may see `route`.
    ///
    /// `index` must map route ids to the routes of the same input set.
    ///
    /// # Errors
    /// Returns an error if the route's `parent_path` chain is cyclic.
    pub fn is_accessible<'a>(
        &self,
        index: &HashMap<&'a str, &'a RoutePermission>,
        route: &'a RoutePermission,
        user: &UserAccessContext,
    ) -> Result<bool> {
        let end = walk_up(index, route, |r| {
            r.public || r.has_explicit_access_controls()
        })?;

        Ok(match end {
            ChainEnd::Matched(decisive) => decisive.public || user.matches(decisive),
            // No ancestor restricts access
            ChainEnd::Root(_) | ChainEnd::Broken { .. } => true,
        })
    }

    /// Determines whether `user` may open `route`.
    ///
    /// Only `developing` routes are gated; access is checked separately.
    pub fn is_clickable(&self, route: &RoutePermission, user: &UserAccessContext) -> bool {
        !route.developing || user.in_department(&self.technology_department)
    }

    /// Filters `routes` down to those visible to `user` and annotates clickability.
    ///
    /// Input order is preserved.
    ///
    /// # Errors
    /// Returns an error if any route's `parent_path` chain is cyclic.
    pub fn resolve(
        &self,
        routes: &[RoutePermission],
        user: &UserAccessContext,
    ) -> Result<AccessibleRoutes> {
        let index = index_by_id(routes);

        let mut accessible = Vec::new();
        for route in routes {
            if self.is_accessible(&index, route, user)? {
                accessible.push(AccessibleRoute {
                    is_clickable: self.is_clickable(route, user),
                    route: route.clone(),
                });
            }
        }

        debug!(
            user_id = %user.id,
            total = routes.len(),
            accessible = accessible.len(),
            "Resolved accessible routes"
        );

        Ok(AccessibleRoutes {
            routes: accessible,
            registered_paths: routes.iter().map(|r| r.path.clone()).collect(),
        })
    }
}

/// Routes visible to one user, with navigation lookups.
#[derive(Debug, Clone)]
pub struct AccessibleRoutes {
    routes: Vec<AccessibleRoute>,
    registered_paths: HashSet<String>,
}

impl AccessibleRoutes {
    /// Returns all accessible routes in input order.
    pub fn routes(&self) -> &[AccessibleRoute] {
        &self.routes
    }

    /// Consumes the set, returning the accessible routes.
    pub fn into_routes(self) -> Vec<AccessibleRoute> {
        self.routes
    }

    /// Number of accessible routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the user can see no routes at all.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the accessible route at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&AccessibleRoute> {
        self.routes.iter().find(|r| r.route.path == path)
    }

    /// Returns accessible routes whose `parent_path` is `parent_id`, in display order.
    pub fn children(&self, parent_id: &str) -> Vec<&AccessibleRoute> {
        sorted(
            self.routes
                .iter()
                .filter(|r| r.route.parent_path.as_deref() == Some(parent_id)),
        )
    }

    /// Returns accessible routes without a parent, in display order.
    pub fn top_level(&self) -> Vec<&AccessibleRoute> {
        sorted(self.routes.iter().filter(|r| r.route.is_top_level()))
    }

    /// Returns top-level routes flagged for the main navigation bar, in display order.
    pub fn main_navigation(&self) -> Vec<&AccessibleRoute> {
        sorted(
            self.routes
                .iter()
                .filter(|r| r.route.is_top_level() && r.route.main_navigation),
        )
    }

    /// Checks a single path, as a page guard would.
    ///
    /// Paths that were never registered are unrestricted and open. Registered
    /// paths the user cannot see are neither accessible nor clickable.
    pub fn permission_for_path(&self, path: &str) -> RoutePermissionStatus {
        match self.get(path) {
            Some(route) => RoutePermissionStatus {
                has_access: true,
                is_clickable: route.is_clickable,
            },
            None if self.registered_paths.contains(path) => RoutePermissionStatus {
                has_access: false,
                is_clickable: false,
            },
            None => RoutePermissionStatus {
                has_access: true,
                is_clickable: true,
            },
        }
    }
}

/// Stable sort by `sort_order`, so ties keep input order.
fn sorted<'a, I>(routes: I) -> Vec<&'a AccessibleRoute>
where
    I: Iterator<Item = &'a AccessibleRoute>,
{
    let mut routes: Vec<&AccessibleRoute> = routes.collect();
    routes.sort_by_key(|r| r.route.effective_sort_order());
    routes
}
