pub mod comments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboards/{dashboard_id}/comments              list, create (requires auth)
/// /dashboard-comments/{id}                         update, delete (author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboards", comments::dashboard_comments_router())
        .nest("/dashboard-comments", comments::comments_router())
}
