//! Route definitions for threaded dashboard comments.
//!
//! Listing and creation are scoped under a dashboard; editing and deletion
//! address a comment directly under `/dashboard-comments`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Dashboard-scoped comment routes, nested under `/dashboards`.
///
/// ```text
/// GET    /{dashboard_id}/comments      list_comments
/// POST   /{dashboard_id}/comments      create_comment
/// ```
pub fn dashboard_comments_router() -> Router<AppState> {
    Router::new().route(
        "/{dashboard_id}/comments",
        get(comments::list_comments).post(comments::create_comment),
    )
}

/// Comment routes, nested under `/dashboard-comments`.
///
/// ```text
/// PUT    /{id}                         update_comment
/// DELETE /{id}                         delete_comment
/// ```
pub fn comments_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(comments::update_comment).delete(comments::delete_comment),
    )
}
