//! Route and user records consumed by the route permission resolver.
//!
//! These mirror the rows of the `route_permissions` and `user_profiles` tables.
//! Access-control columns are nullable in the database; a null list and an
//! empty list mean the same thing here.

use crate::hierarchy::HierarchyNode;
use crate::serde_helpers::{
    key_as_string, keys_as_strings, null_as_default, optional_key_as_string,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a department, team or role.
///
/// The backing tables use integer keys for some entities and uuid strings for
/// others, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessId {
    /// Integer primary key.
    Number(i64),
    /// Textual (usually uuid) primary key.
    Text(String),
}

impl fmt::Display for AccessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessId::Number(n) => write!(f, "{}", n),
            AccessId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AccessId {
    fn from(n: i64) -> Self {
        AccessId::Number(n)
    }
}

impl From<&str> for AccessId {
    fn from(s: &str) -> Self {
        AccessId::Text(s.to_string())
    }
}

/// Access metadata for one navigable route.
///
/// Route and user keys may be exported as integers or strings; both are read
/// into their string form, so `7` and `"7"` name the same route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePermission {
    /// Unique identifier.
    #[serde(deserialize_with = "key_as_string")]
    pub id: String,
    /// URL path, e.g. `/wiki/policies`.
    pub path: String,
    /// `id` (not path) of the parent route; `None` for top-level routes.
    #[serde(default, deserialize_with = "optional_key_as_string")]
    pub parent_path: Option<String>,
    /// Everyone may see this route.
    #[serde(default, deserialize_with = "null_as_default")]
    pub public: bool,
    /// Under development: visible, but only clickable for the technology department.
    #[serde(default, deserialize_with = "null_as_default")]
    pub developing: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department_ids: Vec<AccessId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_ids: Vec<AccessId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_ids: Vec<AccessId>,
    #[serde(default, deserialize_with = "keys_as_strings")]
    pub user_ids: Vec<String>,
    /// Display position among siblings; missing sorts as 0.
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Shown in the main navigation bar when top-level.
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_navigation: bool,
}

impl RoutePermission {
    /// Creates an unrestricted route with no parent.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            parent_path: None,
            public: false,
            developing: false,
            department_ids: Vec::new(),
            team_ids: Vec::new(),
            role_ids: Vec::new(),
            user_ids: Vec::new(),
            sort_order: None,
            main_navigation: false,
        }
    }

    /// Returns true if any department, team, role or user restriction is set.
    ///
    /// Routes without restrictions inherit access from their parent.
    pub fn has_explicit_access_controls(&self) -> bool {
        !self.department_ids.is_empty()
            || !self.team_ids.is_empty()
            || !self.role_ids.is_empty()
            || !self.user_ids.is_empty()
    }

    /// Sort key used for sibling ordering.
    pub fn effective_sort_order(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }

    /// Returns true if the route has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_path.is_none()
    }
}

impl HierarchyNode for RoutePermission {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_path.as_deref()
    }
}

/// Memberships of the user requesting navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessContext {
    /// User identifier, matched against `RoutePermission::user_ids`.
    #[serde(deserialize_with = "key_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department_ids: HashSet<AccessId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_ids: HashSet<AccessId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_ids: HashSet<AccessId>,
    /// Department names; only consulted for the development bypass.
    #[serde(default, deserialize_with = "null_as_default")]
    pub departments: HashSet<String>,
}

impl UserAccessContext {
    /// Creates a user without any memberships.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns true if the user's memberships satisfy the route's restrictions.
    ///
    /// Does not consider `public` or inheritance; see the resolver for that.
    pub fn matches(&self, route: &RoutePermission) -> bool {
        route
            .department_ids
            .iter()
            .any(|id| self.department_ids.contains(id))
            || route.team_ids.iter().any(|id| self.team_ids.contains(id))
            || route.role_ids.iter().any(|id| self.role_ids.contains(id))
            || route.user_ids.iter().any(|id| *id == self.id)
    }

    /// Returns true if the user belongs to the named department (case-sensitive).
    pub fn in_department(&self, name: &str) -> bool {
        self.departments.contains(name)
    }
}

/// A route the user may see, annotated with whether it may be opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibleRoute {
    #[serde(flatten)]
    pub route: RoutePermission,
    pub is_clickable: bool,
}

/// Outcome of checking a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePermissionStatus {
    pub has_access: bool,
    pub is_clickable: bool,
}
