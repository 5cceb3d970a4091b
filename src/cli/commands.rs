//! Command implementations for the Landmark CLI.
//!
//! Each command returns its rendered output so callers decide where it goes.

use crate::{
    cli::{
        args::RouteView,
        utils::{read_json, to_pretty_json},
    },
    comments::{build_comment_tree, CommentRecord},
    routes::{RoutePermission, RouteResolver, UserAccessContext},
    soql::SoqlBuilder,
    Config, LandmarkError, Result,
};
use std::path::Path;
use tracing::info;

/// Execute routes command
pub fn routes(
    config: &Config,
    routes_file: &Path,
    user_file: &Path,
    view: &RouteView,
) -> Result<String> {
    let routes: Vec<RoutePermission> = read_json(routes_file)?;
    let user: UserAccessContext = read_json(user_file)?;

    let resolved = RouteResolver::from_config(config).resolve(&routes, &user)?;

    info!(
        user_id = %user.id,
        total = routes.len(),
        accessible = resolved.len(),
        "Resolved routes"
    );

    match view {
        RouteView::All => to_pretty_json(resolved.routes()),
        RouteView::TopLevel => to_pretty_json(&resolved.top_level()),
        RouteView::MainNavigation => to_pretty_json(&resolved.main_navigation()),
        RouteView::Children(parent_id) => to_pretty_json(&resolved.children(parent_id)),
        RouteView::Path(path) => to_pretty_json(&resolved.permission_for_path(path)),
    }
}

/// Execute comments command
pub fn comments(comments_file: &Path, scroll_to: Option<&str>) -> Result<String> {
    let records: Vec<CommentRecord> = read_json(comments_file)?;
    let tree = build_comment_tree(&records)?;

    info!(
        total = records.len(),
        threads = tree.roots().len(),
        displayed = tree.comment_count(),
        "Built comment threads"
    );

    match scroll_to {
        Some(id) => {
            let target = tree.scroll_target(id).ok_or_else(|| {
                LandmarkError::invalid_input(format!("Comment '{}' is not displayed", id))
            })?;
            to_pretty_json(&target)
        }
        None => to_pretty_json(&tree),
    }
}

/// Execute soql command
pub fn soql(object: &str, fields: &[String], limit: Option<u32>) -> Result<String> {
    let mut builder = SoqlBuilder::new(object).select(fields.iter().cloned());
    if let Some(limit) = limit {
        builder = builder.limit(limit);
    }
    builder.build()
}
