//! # Landmark
//!
//! Core logic behind the Landmark intranet: who can see and open which pages,
//! how article and announcement comments are threaded for display, and how
//! queries against the Salesforce CRM are assembled.
//!
//! ## Modules
//!
//! - [`routes`]: Route visibility and clickability per user, with menu lookups
//! - [`comments`]: Flat comment rows to chronological two-level threads
//! - [`soql`]: Validated, escaped SOQL query strings
//! - [`hierarchy`]: Parent-link walks shared by routes and comments
//!
//! ## Examples
//!
//! ### Resolving navigation
//!
//! ```rust
//! use landmark::routes::{RoutePermission, RouteResolver, UserAccessContext};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut wiki = RoutePermission::new("wiki", "/wiki");
//! wiki.public = true;
//! let mut policies = RoutePermission::new("policies", "/wiki/policies");
//! policies.parent_path = Some("wiki".to_string());
//!
//! let user = UserAccessContext::new("u-1");
//! let routes = RouteResolver::default().resolve(&[wiki, policies], &user)?;
//! assert_eq!(routes.children("wiki").len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Threading comments
//!
//! ```rust
//! use landmark::comments::{build_comment_tree, CommentRecord};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let comments = vec![
//!     CommentRecord::new("r1", None, 1),
//!     CommentRecord::new("c1", Some("r1"), 2),
//!     CommentRecord::new("c2", Some("c1"), 3),
//! ];
//! let tree = build_comment_tree(&comments)?;
//! assert_eq!(tree.roots()[0].replies.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod comments;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod routes;
mod serde_helpers;
pub mod soql;

pub use config::Config;
pub use error::{LandmarkError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
